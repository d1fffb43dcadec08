use crate::domain::model::CalculatorKind;
use crate::utils::error::Result;
use crate::utils::validation::ValidationErrors;
use serde::Serialize;

/// A single estimation form: constraint checking followed by a pure formula.
///
/// `compute` is only ever called with the output of `validate`.
pub trait Calculator {
    const KIND: CalculatorKind;
    type Form;
    type Input;
    type Output: Serialize;

    fn validate(form: &Self::Form) -> std::result::Result<Self::Input, ValidationErrors>;
    fn compute(input: &Self::Input) -> Result<Self::Output>;
}

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// Returns the full path that was written.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        (**self).read_file(path)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        (**self).write_file(path, data)
    }
}
