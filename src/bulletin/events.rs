// Public Bulletin - Events and value types
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use sp_core::crypto::AccountId32;
use std::fmt;
use std::str::FromStr;

/// A member's statement about a permissioned chain at one height.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Commitment {
    pub view: String,
    pub rolling_hash: String,
}

impl Commitment {
    pub fn new(view: impl Into<String>, rolling_hash: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            rolling_hash: rolling_hash.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "OK")]
    Approve,
    #[serde(rename = "NOK")]
    Reject,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Approve => f.write_str("OK"),
            Verdict::Reject => f.write_str("NOK"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown verdict: {0}")]
pub struct ParseVerdictError(String);

impl FromStr for Verdict {
    type Err = ParseVerdictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OK" => Ok(Verdict::Approve),
            "NOK" => Ok(Verdict::Reject),
            other => Err(ParseVerdictError(other.to_string())),
        }
    }
}

/// Announcements made to the committee, SCALE-encoded like on-chain events.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub enum BulletinEvent {
    ViewPublished {
        height: u64,
        member: AccountId32,
        view: String,
    },
    ViewConflict {
        height: u64,
        member: AccountId32,
        view: String,
        rolling_hash: String,
    },
    ViewApprovalRequest {
        height: u64,
        member: AccountId32,
        view: String,
    },
    ApprovalExpired {
        height: u64,
        member: AccountId32,
    },
}

impl BulletinEvent {
    pub fn height(&self) -> u64 {
        match self {
            BulletinEvent::ViewPublished { height, .. }
            | BulletinEvent::ViewConflict { height, .. }
            | BulletinEvent::ViewApprovalRequest { height, .. }
            | BulletinEvent::ApprovalExpired { height, .. } => *height,
        }
    }

    pub fn member(&self) -> &AccountId32 {
        match self {
            BulletinEvent::ViewPublished { member, .. }
            | BulletinEvent::ViewConflict { member, .. }
            | BulletinEvent::ViewApprovalRequest { member, .. }
            | BulletinEvent::ApprovalExpired { member, .. } => member,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_wire_strings() {
        assert_eq!("OK".parse::<Verdict>(), Ok(Verdict::Approve));
        assert_eq!("NOK".parse::<Verdict>(), Ok(Verdict::Reject));
        assert!("ok".parse::<Verdict>().is_err());
        assert_eq!(Verdict::Reject.to_string(), "NOK");
    }

    #[test]
    fn test_event_scale_decoding() {
        let event = BulletinEvent::ViewConflict {
            height: 7,
            member: AccountId32::new([3u8; 32]),
            view: "View".to_string(),
            rolling_hash: "None".to_string(),
        };

        let encoded = event.encode();
        // Variant index of ViewConflict
        assert_eq!(encoded[0], 1);

        let decoded = BulletinEvent::decode(&mut &encoded[..]).unwrap();
        assert_eq!(decoded.height(), 7);
        assert_eq!(decoded.member(), &AccountId32::new([3u8; 32]));
        assert_eq!(decoded, event);
    }
}
