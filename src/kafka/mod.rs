pub mod producer;

pub use producer::LineProducer;
