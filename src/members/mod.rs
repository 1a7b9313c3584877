//! Membership records consumed by the eligibility evaluator.
//!
//! The backend returns members in more than one shape: a flat user record
//! (`{"id", "email", "firstName", ...}`) or a membership wrapping the user
//! (`{"user": {"id", "email"}}`). Both are normalized into
//! [`MembershipRecord`] on deserialization so the evaluator only ever sees
//! one shape.

use serde::{Deserialize, Serialize};

/// One user's association with one RSO.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMember")]
pub struct MembershipRecord {
    /// Backend id of the user, when known.
    pub user_id: Option<u64>,

    /// Email address as supplied; may be absent or malformed.
    pub email: Option<String>,
}

impl MembershipRecord {
    /// Creates a record with only an email.
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            user_id: None,
            email: Some(email.into()),
        }
    }

    /// Creates a record with no email at all.
    pub fn without_email() -> Self {
        Self::default()
    }

    /// Lower-cased email domain, if the email is well formed.
    ///
    /// Well formed means exactly one `@`. An empty email is treated as
    /// absent.
    pub fn domain(&self) -> Option<String> {
        let email = self.email.as_deref().filter(|e| !e.is_empty())?;
        let mut parts = email.split('@');
        let _local = parts.next()?;
        let domain = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(domain.to_lowercase())
    }
}

/// Wire shape accepted from the membership collaborator.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMember {
    // Membership rows may carry a composite key object here instead of a
    // plain user id.
    #[serde(default)]
    id: Option<serde_json::Value>,

    #[serde(default)]
    user_id: Option<serde_json::Value>,

    #[serde(default, rename = "user_id")]
    user_id_snake: Option<serde_json::Value>,

    #[serde(default)]
    email: Option<String>,

    #[serde(default)]
    user: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    #[serde(default)]
    id: Option<u64>,

    #[serde(default)]
    email: Option<String>,
}

impl From<RawMember> for MembershipRecord {
    fn from(raw: RawMember) -> Self {
        let (nested_id, nested_email) = match raw.user {
            Some(user) => (user.id, user.email),
            None => (None, None),
        };

        Self {
            user_id: [raw.id, raw.user_id, raw.user_id_snake]
                .iter()
                .flatten()
                .find_map(serde_json::Value::as_u64)
                .or(nested_id),
            email: raw.email.or(nested_email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_is_lowercased() {
        let member = MembershipRecord::with_email("Knight@UCF.edu");
        assert_eq!(member.domain().as_deref(), Some("ucf.edu"));
    }

    #[test]
    fn test_malformed_emails_have_no_domain() {
        assert_eq!(MembershipRecord::with_email("no-at-sign").domain(), None);
        assert_eq!(MembershipRecord::with_email("a@b@c.edu").domain(), None);
        assert_eq!(MembershipRecord::with_email("").domain(), None);
        assert_eq!(MembershipRecord::without_email().domain(), None);
    }

    #[test]
    fn test_trailing_at_yields_empty_domain() {
        let member = MembershipRecord::with_email("someone@");
        assert_eq!(member.domain().as_deref(), Some(""));
    }

    #[test]
    fn test_deserialize_flat_record() {
        let member: MembershipRecord = serde_json::from_str(
            r#"{"id": 12, "firstName": "Ada", "email": "ada@ucf.edu", "joinDate": "2024-01-01"}"#,
        )
        .unwrap();

        assert_eq!(member.user_id, Some(12));
        assert_eq!(member.email.as_deref(), Some("ada@ucf.edu"));
    }

    #[test]
    fn test_deserialize_nested_user() {
        let member: MembershipRecord =
            serde_json::from_str(r#"{"user": {"id": 3, "email": "bob@ucf.edu"}}"#).unwrap();

        assert_eq!(member.user_id, Some(3));
        assert_eq!(member.email.as_deref(), Some("bob@ucf.edu"));
    }

    #[test]
    fn test_flat_email_wins_over_nested() {
        let member: MembershipRecord = serde_json::from_str(
            r#"{"email": "flat@ucf.edu", "user": {"email": "nested@gmail.com"}}"#,
        )
        .unwrap();

        assert_eq!(member.email.as_deref(), Some("flat@ucf.edu"));
    }

    #[test]
    fn test_composite_membership_key_is_ignored() {
        let member: MembershipRecord = serde_json::from_str(
            r#"{"id": {"userId": 4, "rsoId": 9}, "user": {"id": 4, "email": "c@ucf.edu"}}"#,
        )
        .unwrap();

        assert_eq!(member.user_id, Some(4));
        assert_eq!(member.domain().as_deref(), Some("ucf.edu"));
    }

    #[test]
    fn test_row_with_id_and_user_id() {
        let members: Vec<MembershipRecord> = serde_json::from_str(
            r#"[
                {"id": 5, "userId": 5, "email": "a@ucf.edu"},
                {"userId": 6, "user_id": 6, "email": "b@ucf.edu"},
                {"id": {"rsoId": 2}, "userId": 7, "email": "c@ucf.edu"}
            ]"#,
        )
        .unwrap();

        assert_eq!(members.len(), 3);
        assert_eq!(members[0].user_id, Some(5));
        assert_eq!(members[1].user_id, Some(6));
        assert_eq!(members[2].user_id, Some(7));
    }

    #[test]
    fn test_deserialize_null_email() {
        let member: MembershipRecord = serde_json::from_str(r#"{"email": null}"#).unwrap();
        assert_eq!(member, MembershipRecord::without_email());
    }
}
