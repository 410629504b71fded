use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use crate::errors::{Error, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink};

use super::pledges_model::{NewPledge, NewPledgeRecord, Pledge, PledgeStats, PublicPledge};
use super::pledges_traits::{PledgeRepositoryTrait, PledgeServiceTrait};

pub struct PledgeService {
    repository: Arc<dyn PledgeRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl PledgeService {
    pub fn new(
        repository: Arc<dyn PledgeRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        PledgeService {
            repository,
            event_sink,
        }
    }
}

#[async_trait]
impl PledgeServiceTrait for PledgeService {
    /// Validates the form, derives the rating and inserts exactly once.
    ///
    /// Store failures surface as `Error::Submission` and are never retried here:
    /// a second insert would create a duplicate pledge.
    async fn submit_pledge(&self, new_pledge: NewPledge) -> Result<Pledge> {
        new_pledge.validate()?;

        let record = NewPledgeRecord::from(new_pledge);
        debug!(
            "Submitting pledge with {} commitment(s), {} hearts",
            record.commitment_count, record.hearts_rating
        );

        let pledge = self
            .repository
            .insert_pledge(record)
            .await
            .map_err(|e| Error::Submission(e.to_string()))?;

        info!("Pledge #{} recorded", pledge.pledge_number);
        self.event_sink.emit(DomainEvent::pledge_submitted(&pledge));
        Ok(pledge)
    }

    async fn fetch_stats(&self) -> Result<PledgeStats> {
        let profile_types = self
            .repository
            .load_profile_types()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(PledgeStats::from_profile_types(profile_types))
    }

    async fn fetch_recent_pledges(&self, limit: usize) -> Result<Vec<PublicPledge>> {
        if limit == 0 {
            return Err(Error::Validation(ValidationError::InvalidLimit(limit)));
        }

        let mut pledges = self
            .repository
            .load_public_pledges(limit)
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        // Stable sort keeps the store's tie order for equal timestamps.
        pledges.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        pledges.truncate(limit);
        Ok(pledges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MockDomainEventSink;
    use crate::pledges::ProfileType;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Mutex;

    // ============== Mock Repository ==============

    #[derive(Default)]
    struct MockPledgeRepository {
        rows: Mutex<Vec<Pledge>>,
        insert_calls: Mutex<usize>,
        fail: Mutex<bool>,
    }

    impl MockPledgeRepository {
        fn with_rows(rows: Vec<Pledge>) -> Self {
            Self {
                rows: Mutex::new(rows),
                ..Default::default()
            }
        }

        fn set_fail(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        fn insert_calls(&self) -> usize {
            *self.insert_calls.lock().unwrap()
        }

        fn check_fail(&self) -> Result<()> {
            if *self.fail.lock().unwrap() {
                return Err(Error::Repository("connection reset".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PledgeRepositoryTrait for MockPledgeRepository {
        async fn insert_pledge(&self, record: NewPledgeRecord) -> Result<Pledge> {
            *self.insert_calls.lock().unwrap() += 1;
            self.check_fail()?;

            let mut rows = self.rows.lock().unwrap();
            let pledge_number = rows.len() as i64 + 1;
            let pledge = Pledge {
                id: format!("id-{}", pledge_number),
                pledge_number,
                name: record.name,
                email: record.email,
                mobile: record.mobile,
                state: record.state,
                profile_type: record.profile_type,
                commitments: record.commitments,
                commitment_count: record.commitment_count,
                hearts_rating: record.hearts_rating,
                created_at: Utc::now(),
            };
            rows.push(pledge.clone());
            Ok(pledge)
        }

        async fn load_profile_types(&self) -> Result<Vec<ProfileType>> {
            self.check_fail()?;
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .map(|p| p.profile_type)
                .collect())
        }

        async fn load_public_pledges(&self, _limit: usize) -> Result<Vec<PublicPledge>> {
            self.check_fail()?;
            // Returns everything in insertion order so the service has to
            // sort and truncate on its own.
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .map(PublicPledge::from)
                .collect())
        }
    }

    fn form(commitment_count: usize) -> NewPledge {
        NewPledge {
            name: "Ravi Kumar".to_string(),
            email: "ravi@example.com".to_string(),
            mobile: "9123456780".to_string(),
            state: "Karnataka".to_string(),
            profile_type: ProfileType::WorkingProfessional,
            commitments: (0..commitment_count)
                .map(|i| format!("commitment {}", i))
                .collect(),
        }
    }

    fn stored(pledge_number: i64, profile_type: ProfileType, minutes: i64) -> Pledge {
        Pledge {
            id: format!("id-{}", pledge_number),
            pledge_number,
            name: format!("Pledger {}", pledge_number),
            email: "p@example.com".to_string(),
            mobile: "9000000000".to_string(),
            state: "Goa".to_string(),
            profile_type,
            commitments: vec!["Say no to single-use plastics".to_string()],
            commitment_count: 1,
            hearts_rating: 3,
            created_at: Utc.with_ymd_and_hms(2025, 6, 5, 9, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    fn service(repo: Arc<MockPledgeRepository>, sink: MockDomainEventSink) -> PledgeService {
        PledgeService::new(repo, Arc::new(sink))
    }

    #[tokio::test]
    async fn test_submit_two_commitments_gets_three_hearts() {
        let repo = Arc::new(MockPledgeRepository::default());
        let svc = service(repo.clone(), MockDomainEventSink::new());

        let pledge = svc.submit_pledge(form(2)).await.unwrap();
        assert_eq!(pledge.commitment_count, 2);
        assert_eq!(pledge.hearts_rating, 3);
        assert_eq!(pledge.pledge_number, 1);
    }

    #[tokio::test]
    async fn test_submit_five_and_eight_commitments() {
        let repo = Arc::new(MockPledgeRepository::default());
        let svc = service(repo.clone(), MockDomainEventSink::new());

        assert_eq!(svc.submit_pledge(form(5)).await.unwrap().hearts_rating, 4);
        assert_eq!(svc.submit_pledge(form(8)).await.unwrap().hearts_rating, 5);
        assert_eq!(repo.insert_calls(), 2);
    }

    #[tokio::test]
    async fn test_submit_empty_commitments_never_reaches_store() {
        let repo = Arc::new(MockPledgeRepository::default());
        let sink = MockDomainEventSink::new();
        let svc = service(repo.clone(), sink.clone());

        let err = svc.submit_pledge(form(0)).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NoCommitments)
        ));
        assert_eq!(repo.insert_calls(), 0);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_submit_store_failure_is_submission_error_without_retry() {
        let repo = Arc::new(MockPledgeRepository::default());
        repo.set_fail(true);
        let sink = MockDomainEventSink::new();
        let svc = service(repo.clone(), sink.clone());

        let err = svc.submit_pledge(form(3)).await.unwrap_err();
        assert!(matches!(err, Error::Submission(_)));
        assert_eq!(repo.insert_calls(), 1);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_submit_emits_event() {
        let repo = Arc::new(MockPledgeRepository::default());
        let sink = MockDomainEventSink::new();
        let svc = service(repo, sink.clone());

        svc.submit_pledge(form(4)).await.unwrap();
        let events = sink.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            DomainEvent::PledgeSubmitted(pledge) => {
                assert_eq!(pledge.pledge_number, 1);
                assert_eq!(pledge.hearts_rating, 4);
                assert_eq!(pledge.name, "Ravi Kumar");
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_stats_partitions_profiles() {
        let repo = Arc::new(MockPledgeRepository::with_rows(vec![
            stored(1, ProfileType::Student, 0),
            stored(2, ProfileType::WorkingProfessional, 1),
            stored(3, ProfileType::Other, 2),
            stored(4, ProfileType::Student, 3),
        ]));
        let svc = service(repo, MockDomainEventSink::new());

        let stats = svc.fetch_stats().await.unwrap();
        assert_eq!(
            stats,
            PledgeStats {
                total: 4,
                students: 2,
                professionals: 1,
                workshops: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_stats_failure_is_fetch_error() {
        let repo = Arc::new(MockPledgeRepository::default());
        repo.set_fail(true);
        let svc = service(repo, MockDomainEventSink::new());

        assert!(matches!(
            svc.fetch_stats().await.unwrap_err(),
            Error::Fetch(_)
        ));
    }

    #[tokio::test]
    async fn test_fetch_recent_sorted_and_limited() {
        let repo = Arc::new(MockPledgeRepository::with_rows(
            (1..=8)
                .map(|n| stored(n, ProfileType::Student, n * 5))
                .collect(),
        ));
        let svc = service(repo, MockDomainEventSink::new());

        let recent = svc.fetch_recent_pledges(3).await.unwrap();
        let numbers: Vec<i64> = recent.iter().map(|p| p.pledge_number).collect();
        assert_eq!(numbers, vec![8, 7, 6]);
        assert!(recent
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_fetch_recent_rejects_zero_limit() {
        let repo = Arc::new(MockPledgeRepository::default());
        let svc = service(repo, MockDomainEventSink::new());

        let err = svc.fetch_recent_pledges(0).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
