//! Tests for the account deactivation service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, Months, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;

use super::*;
use crate::domain::deactivation::RefusalReason;
use crate::domain::ports::{
    JobDispatchError, MockAuditLog, MockFavoritesQueue, MockSavedSearchRepository,
    MockUserRepository,
};
use crate::domain::user::UserLevel;

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

fn stored_credential(password: &str) -> Credential {
    Credential::from_password(password).expect("hashing should succeed")
}

fn aged_member(id: i64, name: &str, password: &str) -> User {
    User::builder(UserId::new(id), name, stored_credential(password))
        .email("member@example.test")
        .created_at(fixture_timestamp() - Duration::days(400))
        .build()
}

fn site_owner() -> User {
    User::builder(UserId::new(1), "site_owner", stored_credential("owner password"))
        .level(UserLevel::Owner)
        .created_at(fixture_timestamp() - Duration::days(4000))
        .build()
}

fn make_service(
    users: MockUserRepository,
    saved_searches: MockSavedSearchRepository,
    favorites: MockFavoritesQueue,
    audit: MockAuditLog,
) -> UserDeactivationService<
    MockUserRepository,
    MockSavedSearchRepository,
    MockFavoritesQueue,
    MockAuditLog,
> {
    UserDeactivationService::new(
        Arc::new(users),
        Arc::new(saved_searches),
        Arc::new(favorites),
        Arc::new(audit),
        fixture_clock(),
        DeactivationConfig::default(),
    )
}

#[rstest]
#[case::forty_two(42, "user_42")]
#[case::seven(7, "user_7")]
fn placeholder_names_embed_the_id(#[case] id: i64, #[case] expected: &str) {
    assert_eq!(placeholder_name(UserId::new(id)), expected);
}

#[rstest]
fn self_deletion_rules_accumulate_in_order() {
    let now = fixture_timestamp();
    let user = User::builder(UserId::new(3), "admin_target", stored_credential("right"))
        .level(UserLevel::Admin)
        .banned(true)
        .created_at(now - Duration::days(400))
        .build();
    let request = DeactivationRequest::self_service(user, "wrong");

    let error = validate(&request, &DeactivationConfig::default(), now).expect_err("refused");
    let DeactivationError::Refused(refusal) = &error else {
        panic!("expected a refusal, got {error:?}");
    };
    assert_eq!(
        refusal.reasons(),
        &[
            RefusalReason::IncorrectPassword,
            RefusalReason::AdminAccount,
            RefusalReason::BannedAccount,
        ]
    );
}

#[rstest]
fn third_party_rules_accumulate_in_order() {
    let now = fixture_timestamp();
    let user = User::builder(UserId::new(5), "gold_target", stored_credential("pw"))
        .level(UserLevel::Gold)
        .created_at(now - Duration::days(10))
        .build();
    let deleter = aged_member(6, "plain_member", "pw");
    let request = DeactivationRequest::by_moderator(user, deleter);

    let error = validate(&request, &DeactivationConfig::default(), now).expect_err("refused");
    let DeactivationError::Refused(refusal) = &error else {
        panic!("expected a refusal, got {error:?}");
    };
    assert_eq!(
        refusal.reasons(),
        &[
            RefusalReason::ActorNotOwner,
            RefusalReason::PrivilegedAccount,
            RefusalReason::RecentAccount,
        ]
    );
}

#[rstest]
fn missing_password_fails_the_password_check() {
    let now = fixture_timestamp();
    let user = aged_member(4, "forgetful", "right");
    let request = DeactivationRequest::by_moderator(user.clone(), user);

    let error = validate(&request, &DeactivationConfig::default(), now).expect_err("refused");
    let DeactivationError::Refused(refusal) = &error else {
        panic!("expected a refusal, got {error:?}");
    };
    assert_eq!(refusal.reasons(), &[RefusalReason::IncorrectPassword]);
}

#[rstest]
fn young_accounts_may_still_self_delete() {
    let now = fixture_timestamp();
    let user = User::builder(UserId::new(8), "newcomer", stored_credential("right"))
        .created_at(now - Duration::days(30))
        .build();
    let request = DeactivationRequest::self_service(user, "right");

    validate(&request, &DeactivationConfig::default(), now).expect("no age rule for self-deletion");
}

#[rstest]
fn accounts_on_the_window_boundary_are_not_protected() {
    let now = fixture_timestamp();
    let config = DeactivationConfig::default();
    let cutoff = now
        .checked_sub_months(Months::new(6))
        .expect("cutoff on the calendar");

    assert!(!account_is_protected(cutoff, &config, now));
    assert!(account_is_protected(cutoff + Duration::days(1), &config, now));
}

#[tokio::test]
async fn refusal_touches_no_ports() {
    let user = aged_member(9, "careless", "right");
    let request = DeactivationRequest::self_service(user, "wrong");
    // Fresh mocks panic on any call, so reaching a port fails the test.
    let service = make_service(
        MockUserRepository::new(),
        MockSavedSearchRepository::new(),
        MockFavoritesQueue::new(),
        MockAuditLog::new(),
    );

    let error = service.attempt(request).await.expect_err("refused");
    let DeactivationError::Refused(refusal) = &error else {
        panic!("expected a refusal, got {error:?}");
    };
    assert_eq!(refusal.reasons(), &[RefusalReason::IncorrectPassword]);
}

#[tokio::test]
async fn owner_deactivates_aged_member_account() {
    let now = fixture_timestamp();
    let user = User::builder(UserId::new(7), "collector", stored_credential("hunter2"))
        .email("collector@example.test")
        .favorite_tags("scenery")
        .blacklisted_tags("spoilers")
        .show_deleted_children(true)
        .time_zone("Europe/London")
        .created_at(now - Duration::days(400))
        .last_logged_in_at(now - Duration::days(2))
        .last_forum_read_at(now - Duration::days(3))
        .build();

    let mut users = MockUserRepository::new();
    users
        .expect_name_exists()
        .withf(|name| name == "user_7")
        .times(1)
        .returning(|_| Ok(false));
    users.expect_save().times(3).returning(|_| Ok(()));

    let mut saved_searches = MockSavedSearchRepository::new();
    saved_searches
        .expect_delete_by_user_id()
        .withf(|id| *id == UserId::new(7))
        .times(1)
        .returning(|_| Ok(2));

    let mut favorites = MockFavoritesQueue::new();
    favorites
        .expect_enqueue()
        .withf(|command| command.user_id == UserId::new(7))
        .times(1)
        .returning(|_| Ok(()));

    let mut audit = MockAuditLog::new();
    audit
        .expect_record_name_change()
        .withf(|change| change.original_name == "collector" && change.desired_name == "user_7")
        .times(1)
        .returning(|_| Ok(()));
    audit
        .expect_record_mod_action()
        .withf(|action| {
            action.description == "deleted user #7" && action.creator_id == UserId::new(1)
        })
        .times(1)
        .returning(|_| Ok(()));
    audit.expect_record_user_event().times(0);

    let service = make_service(users, saved_searches, favorites, audit);
    let request = DeactivationRequest::by_moderator(user, site_owner());

    let deactivated = service.attempt(request).await.expect("deactivation succeeds");

    assert_eq!(deactivated.name, "user_7");
    assert!(deactivated.email.is_empty());
    assert!(deactivated.favorite_tags.is_empty());
    assert!(deactivated.blacklisted_tags.is_empty());
    assert!(deactivated.last_logged_in_at.is_none());
    assert!(deactivated.last_forum_read_at.is_none());
    assert!(!deactivated.show_deleted_children);
    assert_eq!(deactivated.time_zone, DeactivationConfig::default().default_time_zone);
    assert!(!deactivated.verify_password("hunter2"));
}

#[tokio::test]
async fn rename_probes_past_taken_placeholders() {
    let now = fixture_timestamp();
    let user = User::builder(UserId::new(42), "rust_fan", stored_credential("hunter2"))
        .created_at(now - Duration::days(400))
        .build();

    let mut users = MockUserRepository::new();
    users
        .expect_name_exists()
        .withf(|name| name == "user_42")
        .times(1)
        .returning(|_| Ok(true));
    users
        .expect_name_exists()
        .withf(|name| name == "user_42~")
        .times(1)
        .returning(|_| Ok(false));
    users.expect_save().times(3).returning(|_| Ok(()));

    let mut saved_searches = MockSavedSearchRepository::new();
    saved_searches
        .expect_delete_by_user_id()
        .times(1)
        .returning(|_| Ok(0));

    let mut favorites = MockFavoritesQueue::new();
    favorites.expect_enqueue().times(1).returning(|_| Ok(()));

    let mut audit = MockAuditLog::new();
    audit
        .expect_record_name_change()
        .withf(|change| change.desired_name == "user_42~")
        .times(1)
        .returning(|_| Ok(()));
    audit
        .expect_record_mod_action()
        .times(1)
        .returning(|_| Ok(()));

    let service = make_service(users, saved_searches, favorites, audit);
    let request = DeactivationRequest::self_service(user, "hunter2");

    let deactivated = service.attempt(request).await.expect("deactivation succeeds");
    assert_eq!(deactivated.name, "user_42~");
}

#[tokio::test]
async fn rename_retries_when_the_constraint_claims_the_candidate() {
    let now = fixture_timestamp();
    let user = User::builder(UserId::new(7), "collector", stored_credential("hunter2"))
        .created_at(now - Duration::days(400))
        .build();

    let mut seq = mockall::Sequence::new();
    let mut users = MockUserRepository::new();
    users.expect_name_exists().returning(|_| Ok(false));
    // Settings scrub persists under the original name.
    users
        .expect_save()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    // A concurrent deactivation wins the race for the first candidate.
    users
        .expect_save()
        .withf(|user| user.name == "user_7")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(UserPersistenceError::name_conflict("user_7")));
    users
        .expect_save()
        .withf(|user| user.name == "user_7~")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    // Credential invalidation persists once more.
    users
        .expect_save()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let mut saved_searches = MockSavedSearchRepository::new();
    saved_searches
        .expect_delete_by_user_id()
        .times(1)
        .returning(|_| Ok(0));

    let mut favorites = MockFavoritesQueue::new();
    favorites.expect_enqueue().times(1).returning(|_| Ok(()));

    let mut audit = MockAuditLog::new();
    audit
        .expect_record_name_change()
        .withf(|change| change.desired_name == "user_7~")
        .times(1)
        .returning(|_| Ok(()));
    audit
        .expect_record_mod_action()
        .times(1)
        .returning(|_| Ok(()));

    let service = make_service(users, saved_searches, favorites, audit);
    let request = DeactivationRequest::self_service(user, "hunter2");

    let deactivated = service.attempt(request).await.expect("deactivation succeeds");
    assert_eq!(deactivated.name, "user_7~");
}

#[tokio::test]
async fn enqueue_failure_propagates_before_saved_search_removal() {
    let now = fixture_timestamp();
    let user = User::builder(UserId::new(7), "collector", stored_credential("hunter2"))
        .created_at(now - Duration::days(400))
        .build();

    let mut users = MockUserRepository::new();
    users.expect_save().times(1).returning(|_| Ok(()));

    let mut favorites = MockFavoritesQueue::new();
    favorites
        .expect_enqueue()
        .times(1)
        .returning(|_| Err(JobDispatchError::rejected("broker refused the job")));

    let service = make_service(
        users,
        MockSavedSearchRepository::new(),
        favorites,
        MockAuditLog::new(),
    );
    let request = DeactivationRequest::self_service(user, "hunter2");

    let error = service.attempt(request).await.expect_err("enqueue failed");
    assert_eq!(
        error,
        DeactivationError::QueueDispatch(JobDispatchError::rejected("broker refused the job"))
    );
}

#[tokio::test]
async fn request_context_lands_in_the_user_event_log() {
    use std::net::{IpAddr, Ipv4Addr};

    let now = fixture_timestamp();
    let ip = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7));
    let user = User::builder(UserId::new(11), "leaver", stored_credential("hunter2"))
        .created_at(now - Duration::days(400))
        .build();

    let mut users = MockUserRepository::new();
    users.expect_name_exists().returning(|_| Ok(false));
    users.expect_save().returning(|_| Ok(()));

    let mut saved_searches = MockSavedSearchRepository::new();
    saved_searches
        .expect_delete_by_user_id()
        .returning(|_| Ok(0));

    let mut favorites = MockFavoritesQueue::new();
    favorites.expect_enqueue().returning(|_| Ok(()));

    let mut audit = MockAuditLog::new();
    audit.expect_record_name_change().returning(|_| Ok(()));
    audit.expect_record_mod_action().returning(|_| Ok(()));
    audit
        .expect_record_user_event()
        .withf(move |event| {
            event.user_id == UserId::new(11)
                && event.category == UserEventCategory::UserDeletion
                && event.ip_addr == ip
        })
        .times(1)
        .returning(|_| Ok(()));

    let service = make_service(users, saved_searches, favorites, audit);
    let request = DeactivationRequest::self_service(user, "hunter2")
        .with_context(RequestContext::new(ip).with_user_agent("integration-suite/1.0"));

    service.attempt(request).await.expect("deactivation succeeds");
}
