// Public Bulletin - Committee-approved commitment ledger
// Members of a permissioned chain publish (view, rolling hash) commitments per height.
// A view already committed by another member is accepted on a matching rolling hash;
// a new view needs a quorum of committee verdicts before it is published.

pub mod events;

use sp_core::crypto::AccountId32;
use sp_core::blake2_128;
use std::collections::HashMap;

pub use events::{BulletinEvent, Commitment, ParseVerdictError, Verdict};

/// Rolling hash of a member's first commitment.
pub const GENESIS_ROLLING_HASH: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BulletinError {
    #[error("Caller is not the bulletin administrator")]
    NotAuthorized,

    #[error("Account {0} is not a committee member")]
    NotMember(AccountId32),

    #[error("Account {0} is already a committee member")]
    AlreadyMember(AccountId32),

    #[error("A commitment for height {height} already exists")]
    AlreadyCommitted { height: u64 },

    #[error("No approval round open for height {height}")]
    NoOpenRound { height: u64 },

    #[error("Account {0} already evaluated this view")]
    AlreadyEvaluated(AccountId32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    Conflict,
    AwaitingApproval { quorum: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Pending { received: usize, quorum: usize },
    Resolved(PublishOutcome),
}

/// Verdicts collected for one member's new view.
#[derive(Debug, Clone)]
pub struct ApprovalRound {
    pub commitment: Commitment,
    pub opened_at: u64,
    pub verdicts: Vec<(AccountId32, Verdict)>,
}

#[derive(Debug)]
pub struct PublicBulletin {
    admin: AccountId32,
    whitelist: Vec<AccountId32>,
    commitments: HashMap<AccountId32, HashMap<u64, Commitment>>,
    rounds: HashMap<(AccountId32, u64), ApprovalRound>,
    current_height: u64,
    timeout: u64,
    events: Vec<BulletinEvent>,
}

/// Expected rolling hash given a member's commitment at the previous height.
///
/// `H(i) = blake2_128(V(i-1) || H(i-1))`, hex encoded. These values do not
/// match hashes produced by the ink! public-bulletin contract, which uses
/// `DefaultHasher`; commitments cannot be carried between the two.
pub fn rolling_hash(previous: Option<&Commitment>) -> String {
    match previous {
        Some(prev) => {
            let mut preimage = Vec::with_capacity(prev.view.len() + prev.rolling_hash.len());
            preimage.extend_from_slice(prev.view.as_bytes());
            preimage.extend_from_slice(prev.rolling_hash.as_bytes());
            hex::encode(blake2_128(&preimage))
        }
        None => GENESIS_ROLLING_HASH.to_string(),
    }
}

/// Verdicts needed to resolve a round for a committee of `members`.
pub fn quorum(members: usize) -> usize {
    if members <= 2 {
        members / 2
    } else {
        members / 2 + 1
    }
}

impl PublicBulletin {
    pub fn new(admin: AccountId32) -> Self {
        Self {
            admin,
            whitelist: Vec::new(),
            commitments: HashMap::new(),
            rounds: HashMap::new(),
            current_height: 0,
            timeout: 0,
            events: Vec::new(),
        }
    }

    fn ensure_admin(&self, caller: &AccountId32) -> Result<(), BulletinError> {
        if caller != &self.admin {
            return Err(BulletinError::NotAuthorized);
        }
        Ok(())
    }

    fn ensure_member(&self, account: &AccountId32) -> Result<(), BulletinError> {
        if !self.is_member(account) {
            return Err(BulletinError::NotMember(account.clone()));
        }
        Ok(())
    }

    pub fn add_member(&mut self, caller: &AccountId32, member: AccountId32) -> Result<(), BulletinError> {
        self.ensure_admin(caller)?;
        if self.is_member(&member) {
            return Err(BulletinError::AlreadyMember(member));
        }
        self.commitments.insert(member.clone(), HashMap::new());
        self.whitelist.push(member);
        Ok(())
    }

    /// Drop a member together with its commitments, open rounds and verdicts,
    /// then resolve any round that meets the smaller quorum.
    pub fn remove_member(&mut self, caller: &AccountId32, member: &AccountId32) -> Result<(), BulletinError> {
        self.ensure_admin(caller)?;
        let index = self
            .whitelist
            .iter()
            .position(|m| m == member)
            .ok_or_else(|| BulletinError::NotMember(member.clone()))?;

        self.whitelist.swap_remove(index);
        self.commitments.remove(member);
        self.rounds.retain(|(owner, _), _| owner != member);
        for round in self.rounds.values_mut() {
            round.verdicts.retain(|(voter, _)| voter != member);
        }

        // The quorum shrank, so rounds may already have enough verdicts.
        let open: Vec<(AccountId32, u64)> = self.rounds.keys().cloned().collect();
        for (owner, height) in open {
            self.try_resolve(&owner, height);
        }
        Ok(())
    }

    pub fn set_timeout(&mut self, caller: &AccountId32, timeout: u64) -> Result<(), BulletinError> {
        self.ensure_admin(caller)?;
        self.timeout = timeout;
        Ok(())
    }

    /// Advance the observed block height and roll back rounds that ran out of time.
    ///
    /// A round expires once the height is at least `timeout` blocks (and at
    /// least one block) past the height it was opened at.
    pub fn increment_height(&mut self, caller: &AccountId32) -> Result<u64, BulletinError> {
        self.ensure_admin(caller)?;
        self.current_height += 1;

        let window = self.timeout.max(1);
        let now = self.current_height;
        let expired: Vec<(AccountId32, u64)> = self
            .rounds
            .iter()
            .filter(|(_, round)| now - round.opened_at >= window)
            .map(|(key, _)| key.clone())
            .collect();

        for (member, height) in expired {
            self.rounds.remove(&(member.clone(), height));
            tracing::debug!(%member, height, "Approval round expired");
            self.events.push(BulletinEvent::ApprovalExpired { height, member });
        }

        Ok(self.current_height)
    }

    pub fn publish_view(
        &mut self,
        caller: &AccountId32,
        height: u64,
        view: impl Into<String>,
        rolling_hash: impl Into<String>,
    ) -> Result<PublishOutcome, BulletinError> {
        self.ensure_member(caller)?;
        let commitment = Commitment::new(view, rolling_hash);

        if self.commitment(caller, height).is_some() || self.rounds.contains_key(&(caller.clone(), height)) {
            return Err(BulletinError::AlreadyCommitted { height });
        }

        let seen_before = self
            .commitments_at(height)
            .iter()
            .any(|existing| existing.view == commitment.view);

        if seen_before {
            return Ok(if commitment.rolling_hash == self.expected_rolling_hash(caller, height) {
                self.add_and_publish(caller, height, commitment)
            } else {
                self.report_conflict(caller, height, commitment)
            });
        }

        self.events.push(BulletinEvent::ViewApprovalRequest {
            height,
            member: caller.clone(),
            view: commitment.view.clone(),
        });
        self.rounds.insert(
            (caller.clone(), height),
            ApprovalRound {
                commitment,
                opened_at: self.current_height,
                verdicts: Vec::new(),
            },
        );

        match self.try_resolve(caller, height) {
            RoundStatus::Resolved(outcome) => Ok(outcome),
            RoundStatus::Pending { quorum, .. } => Ok(PublishOutcome::AwaitingApproval { quorum }),
        }
    }

    /// Record a committee member's verdict on `member`'s view at `height`.
    pub fn evaluate_view(
        &mut self,
        caller: &AccountId32,
        height: u64,
        member: &AccountId32,
        verdict: Verdict,
    ) -> Result<RoundStatus, BulletinError> {
        self.ensure_member(caller)?;
        let round = self
            .rounds
            .get_mut(&(member.clone(), height))
            .ok_or(BulletinError::NoOpenRound { height })?;

        if round.verdicts.iter().any(|(voter, _)| voter == caller) {
            return Err(BulletinError::AlreadyEvaluated(caller.clone()));
        }
        round.verdicts.push((caller.clone(), verdict));

        Ok(self.try_resolve(member, height))
    }

    fn try_resolve(&mut self, member: &AccountId32, height: u64) -> RoundStatus {
        let needed = quorum(self.whitelist.len());
        let key = (member.clone(), height);

        let received = match self.rounds.get(&key) {
            Some(round) => round.verdicts.len(),
            None => return RoundStatus::Pending { received: 0, quorum: needed },
        };
        if received < needed {
            return RoundStatus::Pending { received, quorum: needed };
        }

        let Some(round) = self.rounds.remove(&key) else {
            return RoundStatus::Pending { received, quorum: needed };
        };
        let rejected = round.verdicts.iter().any(|(_, v)| *v == Verdict::Reject);
        let hash_ok = round.commitment.rolling_hash == self.expected_rolling_hash(member, height);

        let outcome = if rejected || !hash_ok {
            self.report_conflict(member, height, round.commitment)
        } else {
            self.add_and_publish(member, height, round.commitment)
        };
        RoundStatus::Resolved(outcome)
    }

    fn add_and_publish(&mut self, member: &AccountId32, height: u64, commitment: Commitment) -> PublishOutcome {
        self.events.push(BulletinEvent::ViewPublished {
            height,
            member: member.clone(),
            view: commitment.view.clone(),
        });
        self.commitments
            .entry(member.clone())
            .or_default()
            .insert(height, commitment);
        PublishOutcome::Published
    }

    fn report_conflict(&mut self, member: &AccountId32, height: u64, commitment: Commitment) -> PublishOutcome {
        tracing::debug!(%member, height, view = %commitment.view, "View conflict");
        self.events.push(BulletinEvent::ViewConflict {
            height,
            member: member.clone(),
            view: commitment.view,
            rolling_hash: commitment.rolling_hash,
        });
        PublishOutcome::Conflict
    }

    pub fn expected_rolling_hash(&self, member: &AccountId32, height: u64) -> String {
        let previous = height
            .checked_sub(1)
            .and_then(|prev| self.commitment(member, prev));
        rolling_hash(previous)
    }

    pub fn commitment(&self, member: &AccountId32, height: u64) -> Option<&Commitment> {
        self.commitments.get(member).and_then(|by_height| by_height.get(&height))
    }

    pub fn commitments_at(&self, height: u64) -> Vec<&Commitment> {
        self.commitments
            .values()
            .filter_map(|by_height| by_height.get(&height))
            .collect()
    }

    pub fn round(&self, member: &AccountId32, height: u64) -> Option<&ApprovalRound> {
        self.rounds.get(&(member.clone(), height))
    }

    pub fn is_member(&self, account: &AccountId32) -> bool {
        self.whitelist.contains(account)
    }

    pub fn members(&self) -> &[AccountId32] {
        &self.whitelist
    }

    pub fn admin(&self) -> &AccountId32 {
        &self.admin
    }

    pub fn current_height(&self) -> u64 {
        self.current_height
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Events not yet drained. The log is unbounded; callers that keep a
    /// bulletin alive should `drain_events` regularly.
    pub fn events(&self) -> &[BulletinEvent] {
        &self.events
    }

    /// Take every pending event, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<BulletinEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(byte: u8) -> AccountId32 {
        AccountId32::new([byte; 32])
    }

    fn bulletin_with(members: &[u8]) -> PublicBulletin {
        let admin = account(0);
        let mut bulletin = PublicBulletin::new(admin.clone());
        for byte in members {
            bulletin.add_member(&admin, account(*byte)).unwrap();
        }
        bulletin
    }

    #[test]
    fn test_quorum_sizes() {
        assert_eq!(quorum(1), 0);
        assert_eq!(quorum(2), 1);
        assert_eq!(quorum(3), 2);
        assert_eq!(quorum(4), 3);
        assert_eq!(quorum(5), 3);
    }

    #[test]
    fn test_rolling_hash_genesis() {
        assert_eq!(rolling_hash(None), GENESIS_ROLLING_HASH);

        let prev = Commitment::new("View1", "None");
        let hash = rolling_hash(Some(&prev));
        assert_eq!(hash.len(), 32);
        assert_ne!(hash, rolling_hash(Some(&Commitment::new("View2", "None"))));
    }

    #[test]
    fn test_rolling_hash_differs_from_contract_hasher() {
        // The ink! contract yields 6d8694a1e486efa9 for this commitment.
        let hash = rolling_hash(Some(&Commitment::new("View1", "None")));
        assert_ne!(hash, "6d8694a1e486efa9");
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_only_admin_manages_members() {
        let mut bulletin = bulletin_with(&[]);
        assert_eq!(
            bulletin.add_member(&account(9), account(1)),
            Err(BulletinError::NotAuthorized)
        );
        bulletin.add_member(&account(0), account(1)).unwrap();
        assert_eq!(
            bulletin.add_member(&account(0), account(1)),
            Err(BulletinError::AlreadyMember(account(1)))
        );
        assert_eq!(bulletin.members(), &[account(1)]);
    }

    #[test]
    fn test_single_member_publishes_immediately() {
        let mut bulletin = bulletin_with(&[1]);
        let outcome = bulletin.publish_view(&account(1), 1, "View", "None").unwrap();

        assert_eq!(outcome, PublishOutcome::Published);
        assert_eq!(bulletin.commitment(&account(1), 1), Some(&Commitment::new("View", "None")));
        assert!(matches!(bulletin.events()[0], BulletinEvent::ViewApprovalRequest { .. }));
        assert!(matches!(bulletin.events()[1], BulletinEvent::ViewPublished { .. }));
    }

    #[test]
    fn test_removed_member_cannot_publish() {
        let mut bulletin = bulletin_with(&[1]);
        bulletin.publish_view(&account(1), 1, "TryAddView", "None").unwrap();
        bulletin.remove_member(&account(0), &account(1)).unwrap();

        assert_eq!(
            bulletin.publish_view(&account(1), 2, "TryAddOtherView", "None"),
            Err(BulletinError::NotMember(account(1)))
        );
        assert!(bulletin.commitment(&account(1), 1).is_none());
    }

    #[test]
    fn test_drain_events_empties_log() {
        let mut bulletin = bulletin_with(&[1]);
        bulletin.publish_view(&account(1), 1, "View", "None").unwrap();
        assert_eq!(bulletin.drain_events().len(), 2);
        assert!(bulletin.events().is_empty());
    }
}
