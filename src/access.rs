//! Premium access gate
//!
//! Decides, on every attempt, whether the viewer may open a tool. Nothing is
//! cached: the decision is a pure function of the tool and the identity.

use crate::catalog::ToolDescriptor;
use crate::identity::CurrentUser;
use std::fmt;

/// Outcome of an access check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// No identity; the viewer must sign in first
    SignInRequired,
    /// Signed in, but the email is unverified and the provider is not trusted
    VerificationRequired,
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted => f.write_str("access granted"),
            Self::SignInRequired => {
                f.write_str("this is a premium tool; sign in to use it (toolbox login)")
            }
            Self::VerificationRequired => f.write_str(
                "email verification required; verify your email address to use premium tools",
            ),
        }
    }
}

/// Whether `user` may use premium tools at all
pub fn has_premium_access(user: Option<&CurrentUser>) -> Access {
    match user {
        None => Access::SignInRequired,
        Some(u) if u.email_verified || u.provider.is_trusted() => Access::Granted,
        Some(_) => Access::VerificationRequired,
    }
}

/// Whether `user` may open `tool`
pub fn check_access(tool: &ToolDescriptor, user: Option<&CurrentUser>) -> Access {
    if !tool.is_premium {
        return Access::Granted;
    }
    has_premium_access(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::identity::Provider;
    use crate::tools::ToolKind;

    fn tool(is_premium: bool) -> ToolDescriptor {
        ToolDescriptor {
            id: "json-formatter",
            name: "JSON Formatter",
            description: "",
            category: Category::Developer,
            icon: "Braces",
            is_premium,
            kind: ToolKind::JsonFormatter,
        }
    }

    #[test]
    fn test_free_tool_always_granted() {
        assert_eq!(check_access(&tool(false), None), Access::Granted);
        let unverified = CurrentUser::new("a@b.co", Provider::Password, false);
        assert_eq!(check_access(&tool(false), Some(&unverified)), Access::Granted);
    }

    #[test]
    fn test_premium_requires_sign_in() {
        assert_eq!(check_access(&tool(true), None), Access::SignInRequired);
    }

    #[test]
    fn test_premium_requires_verification_for_password_users() {
        let unverified = CurrentUser::new("a@b.co", Provider::Password, false);
        assert_eq!(
            check_access(&tool(true), Some(&unverified)),
            Access::VerificationRequired
        );

        let verified = CurrentUser::new("a@b.co", Provider::Password, true);
        assert_eq!(check_access(&tool(true), Some(&verified)), Access::Granted);
    }

    #[test]
    fn test_trusted_provider_implicitly_verified() {
        let google = CurrentUser::new("a@gmail.com", Provider::Google, false);
        assert_eq!(check_access(&tool(true), Some(&google)), Access::Granted);

        let other = CurrentUser::new("a@b.co", Provider::Other("github.com".into()), false);
        assert_eq!(
            check_access(&tool(true), Some(&other)),
            Access::VerificationRequired
        );
    }
}
