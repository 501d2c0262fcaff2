//! Optional-value tagged union.

/// A value that is either present or absent.
///
/// `Maybe` mirrors `Option` but is part of the store value vocabulary,
/// so rendering code matches on it exhaustively through
/// [`render_maybe_value`](super::render_maybe_value) rather than
/// unwrapping ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Maybe<T> {
    /// No value present.
    #[default]
    None,
    /// Exactly one value present.
    Some(T),
}

impl<T> Maybe<T> {
    /// Construct the absent state.
    pub fn none() -> Self {
        Maybe::None
    }

    /// Construct the present state.
    pub fn some(value: T) -> Self {
        Maybe::Some(value)
    }

    /// Whether a value is present.
    pub fn is_some(&self) -> bool {
        matches!(self, Maybe::Some(_))
    }

    /// Whether no value is present.
    pub fn is_none(&self) -> bool {
        matches!(self, Maybe::None)
    }

    /// The contained value.
    ///
    /// # Panics
    /// Panics if the union is `None`. Use [`get_maybe`](Self::get_maybe)
    /// or [`get_or_else`](Self::get_or_else) for total access.
    pub fn get(&self) -> &T {
        match self {
            Maybe::Some(value) => value,
            Maybe::None => panic!("expected Some but got None"),
        }
    }

    /// The contained value, or `None` if absent. Never panics.
    pub fn get_maybe(&self) -> Option<&T> {
        match self {
            Maybe::Some(value) => Some(value),
            Maybe::None => None,
        }
    }
}

impl<T: Clone> Maybe<T> {
    /// The contained value, or a lazily computed fallback. Never panics.
    pub fn get_or_else(&self, fallback: impl FnOnce() -> T) -> T {
        match self {
            Maybe::Some(value) => value.clone(),
            Maybe::None => fallback(),
        }
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Maybe::Some(v),
            None => Maybe::None,
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(value: Maybe<T>) -> Self {
        match value {
            Maybe::Some(v) => Some(v),
            Maybe::None => None,
        }
    }
}
