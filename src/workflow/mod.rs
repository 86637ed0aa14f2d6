pub mod classify_flow;

pub use classify_flow::ClassifyFlow;
