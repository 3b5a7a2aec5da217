use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Retrieval failure: {0}")]
    Retrieval(String),

    #[error("Surprise undefined: estimated EPS is zero")]
    DivisionUndefined,

    #[error("Inference failure: {0}")]
    Inference(String),
}
