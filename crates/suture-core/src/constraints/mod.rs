/// Elastic constraints written by the suture synthesizer.
pub mod spring;
