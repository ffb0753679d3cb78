//! Configuration access port trait.

pub trait ConfigPort {
    /// Scalar value under `section`, rendered as text. `None` when the
    /// section or key is absent or null.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Integer value under `section`. `None` when absent or null;
    /// `Some(Err(text))` when present but not written as an integer, e.g. a
    /// quoted string or a float.
    fn get_integer(&self, section: &str, key: &str) -> Option<Result<i64, String>>;

    /// Top-level list of scalars, e.g. the ticker list.
    fn get_list(&self, key: &str) -> Option<Vec<String>>;
}
