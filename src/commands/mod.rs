mod inspect;
mod list;
mod verify;

pub use inspect::{InspectType, inspect_command};
pub use list::list_command;
pub use verify::verify_command;

/// Render a diagnostic the way miette wants it, then surface a terse
/// failure to the exit path.
pub(crate) fn report<E>(err: E) -> anyhow::Error
where
    E: miette::Diagnostic + Send + Sync + 'static,
{
    eprintln!();
    eprintln!("{:?}", miette::Report::new(err));
    anyhow::anyhow!("Data validation failed")
}
