pub mod assembler;
pub mod encoder;
pub mod options;
pub mod predictor;
pub mod service;
pub mod smartcore_predictor;
