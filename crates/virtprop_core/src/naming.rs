//! Accessor naming conventions (well-known identifiers).
//!
//! A property key `name` is served by the accessors `getName` and `setName`: the key's first character is
//! upper-cased and a `get` / `set` prefix is prepended. Rust methods are declared in snake case (`get_read_only`),
//! so the macros translate them into the same camel-case identifiers (`getReadOnly`) the runtime derives from keys.

/// Prefix of getter accessor identifiers.
pub const GETTER_PREFIX: &str = "get";

/// Prefix of setter accessor identifiers.
pub const SETTER_PREFIX: &str = "set";

/// Distinguish the two accessor directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Getter,
    Setter,
}

impl AccessorKind {
    /// Return the identifier prefix for this accessor kind.
    pub const fn prefix(self) -> &'static str {
        match self {
            AccessorKind::Getter => GETTER_PREFIX,
            AccessorKind::Setter => SETTER_PREFIX,
        }
    }

    /// Build the accessor identifier serving `key` (e.g. `Getter` + `name` → `getName`).
    pub fn accessor_name(self, key: &str) -> String {
        let prefix = self.prefix();
        let mut out = String::with_capacity(prefix.len() + key.len());
        out.push_str(prefix);
        out.push_str(&uppercase_first(key));
        out
    }
}

/// Upper-case the first character of `key` and keep the remainder unchanged.
///
/// ## Notes
/// - An empty key is returned unchanged.
/// - Only the first Unicode scalar is converted; `char::to_uppercase` may expand it (`ß` → `SS`).
///
/// ## Examples
/// ```rust
/// use virtprop_core::uppercase_first;
/// assert_eq!(uppercase_first("readOnly"), "ReadOnly");
/// assert_eq!(uppercase_first(""), "");
/// ```
pub fn uppercase_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Identifier of the getter serving `key` (`name` → `getName`).
pub fn getter_name(key: &str) -> String {
    AccessorKind::Getter.accessor_name(key)
}

/// Identifier of the setter serving `key` (`name` → `setName`).
pub fn setter_name(key: &str) -> String {
    AccessorKind::Setter.accessor_name(key)
}

/// Translate a snake-case Rust method name into an accessor identifier.
///
/// ## Returns
/// - `Some((kind, identifier))` for `get_<snake>` / `set_<snake>` methods, e.g.
///   `get_read_only` → `(Getter, "getReadOnly")`.
/// - `None` when the method does not follow the convention, or the part after the prefix is empty.
///
/// ## Notes
/// - Empty segments (`get__x`) are skipped, so `get__x` and `get_x` map to the same identifier.
pub fn accessor_from_method(method: &str) -> Option<(AccessorKind, String)> {
    let (kind, rest) = if let Some(rest) = method.strip_prefix("get_") {
        (AccessorKind::Getter, rest)
    } else if let Some(rest) = method.strip_prefix("set_") {
        (AccessorKind::Setter, rest)
    } else {
        return None;
    };

    let camel: String = rest
        .split('_')
        .filter(|segment| !segment.is_empty())
        .map(uppercase_first)
        .collect();
    if camel.is_empty() {
        return None;
    }

    let mut ident = String::from(kind.prefix());
    ident.push_str(&camel);
    Some((kind, ident))
}
