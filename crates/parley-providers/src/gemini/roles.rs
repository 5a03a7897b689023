//! Mapping from Parley roles to Gemini `contents[].role` values.

use parley_core::Role;

/// Gemini role for a history message.
pub fn vendor_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Instructor => "assistant",
        Role::Assistant => "model",
    }
}

/// Gemini role for a raw role tag; unrecognized tags map to `"user"`.
pub fn vendor_role_for_tag(tag: &str) -> &'static str {
    vendor_role(Role::from_tag(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_table() {
        assert_eq!(vendor_role(Role::User), "user");
        assert_eq!(vendor_role(Role::Instructor), "assistant");
        assert_eq!(vendor_role(Role::Assistant), "model");
    }

    #[test]
    fn test_mapping_is_total() {
        for role in Role::ALL {
            assert!(["user", "assistant", "model"].contains(&vendor_role(role)));
        }
    }

    #[test]
    fn test_unknown_tags_fall_back_to_user() {
        assert_eq!(vendor_role_for_tag("system"), "user");
        assert_eq!(vendor_role_for_tag("tool"), "user");
        assert_eq!(vendor_role_for_tag(""), "user");
        assert_eq!(vendor_role_for_tag("assistant"), "model");
        assert_eq!(vendor_role_for_tag("instructor"), "assistant");
    }
}
