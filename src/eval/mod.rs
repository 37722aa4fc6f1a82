pub(crate) mod evaluator;
pub(crate) mod fingerprint;
pub(crate) mod range;
