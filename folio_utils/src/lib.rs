use std::sync::LazyLock;

pub mod html;
mod macros;

/// The version of the folio workspace.
pub const fn folio_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// The `User-Agent` header sent with every outgoing http request.
pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let repository = env!("CARGO_PKG_REPOSITORY");
    let version = folio_version();

    format!("folio ({repository}, Version {version})")
});

const _: () = {
    assert!(!env!("CARGO_PKG_REPOSITORY").is_empty());
};

/// Chaining helpers for builder style apis.
pub trait Apply {
    /// Applies `f` with the contained value if `value` is `Some`, otherwise
    /// returns `self` unchanged.
    ///
    /// ```rust
    /// # use folio_utils::Apply;
    /// let greeting = String::from("Hello").apply_map(Some("Ada"), |s, name| s + ", " + name);
    /// assert_eq!(greeting, "Hello, Ada");
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }
}

impl<T> Apply for T {}
