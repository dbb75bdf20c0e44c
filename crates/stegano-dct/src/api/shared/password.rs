use std::fmt::{self, Debug, Formatter};

/// Password selecting the coefficient walk.
///
/// An unset password behaves like the empty password, it still selects a
/// (well known) walk.
#[derive(Default, Clone)]
pub struct Password(Option<String>);

impl Password {
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or_default()
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(password) => write!(f, "Password({})", "*".repeat(password.chars().count())),
            None => write!(f, "Password(None)"),
        }
    }
}

impl From<Option<String>> for Password {
    fn from(password: Option<String>) -> Self {
        Self(password)
    }
}

impl From<&str> for Password {
    fn from(password: &str) -> Self {
        Self(Some(password.to_string()))
    }
}

impl From<String> for Password {
    fn from(password: String) -> Self {
        Self(Some(password))
    }
}

impl AsRef<Option<String>> for Password {
    fn as_ref(&self) -> &Option<String> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_password_reads_as_empty() {
        let password: Password = None.into();
        assert_eq!(password.as_ref(), &None);
        assert_eq!(password.as_str(), "");
        assert!(!password.is_set());

        let password: Password = "päss".into();
        assert_eq!(password.as_str(), "päss");
        assert!(password.is_set());
    }

    #[test]
    fn debug_masks_the_value() {
        let password: Password = None.into();
        assert_eq!(format!("{:?}", password), "Password(None)");

        let password: Password = String::from("päss").into();
        assert_eq!(format!("{:?}", password), "Password(****)");
    }
}
