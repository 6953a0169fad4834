mod alias_graph;

pub use alias_graph::AliasGraph;
