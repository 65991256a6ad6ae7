//! Rating service tests over the in-memory repositories
//!
//! Exercise the statistics bookkeeping directly through `RatingService`:
//! incremental updates, rejected operations leaving no partial state,
//! compensation when one of the two writes fails, and concurrent writers.
//!
//! Run with: cargo test -p integration-tests --test rating_service_tests

use std::sync::Arc;

use async_trait::async_trait;
use integration_tests::{
    memory_context, memory_context_with_ratings, random_score, recipe_entity, Faults, MemoryStore,
};
use rand::Rng;
use recipe_core::entities::Rating;
use recipe_core::traits::{RatingRepository, RepoResult};
use recipe_core::{RatingStats, Score, Snowflake};
use recipe_service::dto::UpdateRatingRequest;
use recipe_service::{RatingService, ServiceContext};

const EPSILON: f64 = 1e-9;

struct Harness {
    store: Arc<MemoryStore>,
    ctx: ServiceContext,
}

impl Harness {
    fn new() -> Self {
        let store = MemoryStore::new();
        let ctx = memory_context(&store).unwrap();
        Self { store, ctx }
    }

    fn ratings(&self) -> RatingService<'_> {
        RatingService::new(&self.ctx)
    }

    fn seed_recipe(&self) -> Snowflake {
        let id = self.ctx.generate_id();
        self.store.insert_recipe(recipe_entity(id, user(1)));
        id
    }

    fn stats(&self, recipe_id: Snowflake) -> RatingStats {
        self.store.recipe(recipe_id).unwrap().rating_stats()
    }

    fn assert_stats(&self, recipe_id: Snowflake, average: f64, count: i64) {
        let stats = self.stats(recipe_id);
        assert_eq!(stats.count, count, "count of {stats:?}");
        assert!(
            (stats.average - average).abs() < EPSILON,
            "expected average {average}, got {}",
            stats.average
        );
    }
}

fn user(n: i64) -> Snowflake {
    Snowflake::new(1_000 + n)
}

fn id_of(raw: &str) -> Snowflake {
    Snowflake::parse(raw).unwrap()
}

fn rescore(score: i32) -> UpdateRatingRequest {
    UpdateRatingRequest { rating: Some(score) }
}

// ============================================================================
// Incremental statistics
// ============================================================================

#[tokio::test]
async fn test_statistics_follow_rating_history() {
    let h = Harness::new();
    let recipe_id = h.seed_recipe();
    h.assert_stats(recipe_id, 0.0, 0);

    let first = h.ratings().create(recipe_id, user(1), 4).await.unwrap();
    h.assert_stats(recipe_id, 4.0, 1);

    let second = h.ratings().create(recipe_id, user(2), 2).await.unwrap();
    h.assert_stats(recipe_id, 3.0, 2);

    let updated = h
        .ratings()
        .update(id_of(&second.id), rescore(5))
        .await
        .unwrap();
    assert_eq!(updated.rating, 5);
    h.assert_stats(recipe_id, 4.5, 2);

    h.ratings().delete(id_of(&first.id)).await.unwrap();
    h.assert_stats(recipe_id, 5.0, 1);

    h.ratings().delete(id_of(&second.id)).await.unwrap();
    h.assert_stats(recipe_id, 0.0, 0);
    assert_eq!(h.store.rating_count(recipe_id), 0);
}

#[tokio::test]
async fn test_same_score_update_leaves_statistics_alone() {
    let h = Harness::new();
    let recipe_id = h.seed_recipe();

    let rating = h.ratings().create(recipe_id, user(1), 3).await.unwrap();
    h.ratings().create(recipe_id, user(2), 4).await.unwrap();
    let before = h.stats(recipe_id);

    let same = h
        .ratings()
        .update(id_of(&rating.id), rescore(3))
        .await
        .unwrap();
    assert_eq!(same.rating, 3);
    assert!(same.updated_at >= rating.updated_at);
    assert_eq!(h.stats(recipe_id), before);

    let untouched = h
        .ratings()
        .update(id_of(&rating.id), UpdateRatingRequest { rating: None })
        .await
        .unwrap();
    assert_eq!(untouched.rating, 3);
    assert_eq!(h.stats(recipe_id), before);
}

#[tokio::test]
async fn test_random_history_matches_recomputed_mean() {
    let h = Harness::new();
    let recipe_id = h.seed_recipe();
    let mut rng = rand::thread_rng();
    let mut live: Vec<Snowflake> = Vec::new();

    for step in 0..200_i64 {
        match rng.gen_range(0..3) {
            0 => {
                let created = h
                    .ratings()
                    .create(recipe_id, user(step), random_score())
                    .await
                    .unwrap();
                live.push(id_of(&created.id));
            }
            1 if !live.is_empty() => {
                let target = live[rng.gen_range(0..live.len())];
                h.ratings()
                    .update(target, rescore(random_score()))
                    .await
                    .unwrap();
            }
            _ if !live.is_empty() => {
                let target = live.swap_remove(rng.gen_range(0..live.len()));
                h.ratings().delete(target).await.unwrap();
            }
            _ => {}
        }

        let expected = RatingStats::from_scores(
            live.iter().map(|id| h.store.rating(*id).unwrap().score),
        );
        h.assert_stats(recipe_id, expected.average, expected.count);
    }
}

// ============================================================================
// Rejected operations
// ============================================================================

#[tokio::test]
async fn test_out_of_range_score_is_rejected() {
    let h = Harness::new();
    let recipe_id = h.seed_recipe();

    for score in [0, 6, -1] {
        let err = h
            .ratings()
            .create(recipe_id, user(1), score)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_RATING");
    }

    let rating = h.ratings().create(recipe_id, user(1), 2).await.unwrap();
    let err = h
        .ratings()
        .update(id_of(&rating.id), rescore(9))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    assert_eq!(h.store.rating(id_of(&rating.id)).unwrap().score, Score::new(2).unwrap());
    h.assert_stats(recipe_id, 2.0, 1);
}

#[tokio::test]
async fn test_rating_missing_recipe_leaves_nothing_behind() {
    let h = Harness::new();
    let missing = Snowflake::new(424_242);

    let err = h
        .ratings()
        .create(missing, user(1), 4)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.error_code(), "UNKNOWN_RECIPE");
    assert_eq!(h.store.rating_count(missing), 0);

    let err = h.ratings().list_recipe_ratings(missing).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_rating_of_vanished_recipe_cannot_change() {
    let h = Harness::new();
    let missing = Snowflake::new(535_353);
    let orphan = Rating::new(h.ctx.generate_id(), user(1), missing, Score::new(3).unwrap());
    h.store.insert_rating(orphan.clone());

    let err = h
        .ratings()
        .update(orphan.id, rescore(5))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.error_code(), "UNKNOWN_RECIPE");

    let err = h.ratings().delete(orphan.id).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.error_code(), "UNKNOWN_RECIPE");

    assert_eq!(h.store.rating(orphan.id), Some(orphan));
}

#[tokio::test]
async fn test_second_rating_by_same_user_conflicts() {
    let h = Harness::new();
    let recipe_id = h.seed_recipe();

    h.ratings().create(recipe_id, user(1), 5).await.unwrap();
    let err = h
        .ratings()
        .create(recipe_id, user(1), 1)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 409);
    assert_eq!(err.error_code(), "RATING_ALREADY_EXISTS");
    h.assert_stats(recipe_id, 5.0, 1);
    assert_eq!(h.store.rating_count(recipe_id), 1);
}

#[tokio::test]
async fn test_unknown_rating_ids_are_not_found() {
    let h = Harness::new();
    let recipe_id = h.seed_recipe();
    let unknown = Snowflake::new(777);

    assert_eq!(
        h.ratings().update(unknown, rescore(3)).await.unwrap_err().status_code(),
        404
    );
    assert_eq!(h.ratings().delete(unknown).await.unwrap_err().status_code(), 404);

    let err = h.ratings().get_rating(recipe_id, user(9)).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.error_code(), "UNKNOWN_RATING");
}

// ============================================================================
// Consistency faults and compensation
// ============================================================================

#[tokio::test]
async fn test_zero_count_delete_is_fault_and_keeps_rating() {
    let h = Harness::new();
    let recipe_id = h.seed_recipe();
    let rating = h.ratings().create(recipe_id, user(1), 4).await.unwrap();
    let rating_id = id_of(&rating.id);

    h.store.corrupt_stats(recipe_id, RatingStats::EMPTY);

    let err = h.ratings().delete(rating_id).await.unwrap_err();
    assert!(err.is_consistency_fault());
    assert_eq!(err.status_code(), 500);
    assert!(h.store.rating(rating_id).is_some());
    h.assert_stats(recipe_id, 0.0, 0);

    let err = h
        .ratings()
        .update(rating_id, rescore(1))
        .await
        .unwrap_err();
    assert!(err.is_consistency_fault());
    assert_eq!(h.store.rating(rating_id).unwrap().score, Score::new(4).unwrap());
}

#[tokio::test]
async fn test_failed_statistics_write_undoes_rating_write() {
    let h = Harness::new();
    let recipe_id = h.seed_recipe();
    let rating = h.ratings().create(recipe_id, user(1), 4).await.unwrap();
    let rating_id = id_of(&rating.id);

    Faults::set(&h.store.faults.stats_update, true);

    let err = h.ratings().create(recipe_id, user(2), 1).await.unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert_eq!(h.store.rating_count(recipe_id), 1);

    h.ratings()
        .update(rating_id, rescore(2))
        .await
        .unwrap_err();
    assert_eq!(h.store.rating(rating_id).unwrap().score, Score::new(4).unwrap());

    Faults::set(&h.store.faults.stats_update, false);
    h.assert_stats(recipe_id, 4.0, 1);
}

#[tokio::test]
async fn test_failed_rating_delete_restores_statistics() {
    let h = Harness::new();
    let recipe_id = h.seed_recipe();
    let rating = h.ratings().create(recipe_id, user(1), 4).await.unwrap();
    h.ratings().create(recipe_id, user(2), 1).await.unwrap();

    Faults::set(&h.store.faults.rating_delete, true);
    let err = h.ratings().delete(id_of(&rating.id)).await.unwrap_err();
    Faults::set(&h.store.faults.rating_delete, false);

    assert_eq!(err.status_code(), 500);
    assert!(h.store.rating(id_of(&rating.id)).is_some());
    h.assert_stats(recipe_id, 2.5, 2);
}

#[tokio::test]
async fn test_reconcile_repairs_drift() {
    let h = Harness::new();
    let recipe_id = h.seed_recipe();
    h.ratings().create(recipe_id, user(1), 5).await.unwrap();
    h.ratings().create(recipe_id, user(2), 2).await.unwrap();

    h.store.corrupt_stats(recipe_id, RatingStats::new(1.0, 7));

    let outcome = h.ratings().reconcile_stats(recipe_id).await.unwrap();
    assert!(outcome.drifted);
    assert_eq!(outcome.previous, RatingStats::new(1.0, 7));
    assert_eq!(outcome.current.count, 2);
    h.assert_stats(recipe_id, 3.5, 2);

    let again = h.ratings().reconcile_stats(recipe_id).await.unwrap();
    assert!(!again.drifted);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_ratings_lose_no_update() {
    let store = MemoryStore::new();
    let ctx = Arc::new(memory_context(&store).unwrap());
    let recipe_id = ctx.generate_id();
    store.insert_recipe(recipe_entity(recipe_id, user(0)));

    let scores: Vec<i32> = (0..64).map(|_| random_score()).collect();

    let handles = scores.iter().enumerate().map(|(i, &score)| {
        let ctx = Arc::clone(&ctx);
        tokio::spawn(async move {
            RatingService::new(&ctx)
                .create(recipe_id, user(i as i64), score)
                .await
        })
    });
    let created: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    let expected = RatingStats::from_scores(scores.iter().map(|s| Score::new(*s).unwrap()));
    let stats = store.recipe(recipe_id).unwrap().rating_stats();
    assert_eq!(stats.count, 64);
    assert!((stats.average - expected.average).abs() < EPSILON);

    // Half are deleted and half rescored to 5, all at once
    let handles = created.iter().enumerate().map(|(i, rating)| {
        let ctx = Arc::clone(&ctx);
        let rating_id = id_of(&rating.id);
        tokio::spawn(async move {
            let service = RatingService::new(&ctx);
            if i % 2 == 0 {
                service.delete(rating_id).await
            } else {
                service.update(rating_id, rescore(5)).await.map(|_| ())
            }
        })
    });
    for joined in futures::future::join_all(handles).await {
        joined.unwrap().unwrap();
    }

    let stats = store.recipe(recipe_id).unwrap().rating_stats();
    assert_eq!(stats.count, 32);
    assert!((stats.average - 5.0).abs() < EPSILON);
}

/// Ratings whose reads yield to the scheduler before returning, so two
/// updates of one rating both read before either writes
struct InterleavedReads(Arc<dyn RatingRepository>);

#[async_trait]
impl RatingRepository for InterleavedReads {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Rating>> {
        let found = self.0.find_by_id(id).await;
        tokio::task::yield_now().await;
        found
    }

    async fn find_by_recipe_and_user(
        &self,
        recipe_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Rating>> {
        self.0.find_by_recipe_and_user(recipe_id, user_id).await
    }

    async fn find_by_recipe(&self, recipe_id: Snowflake) -> RepoResult<Vec<Rating>> {
        self.0.find_by_recipe(recipe_id).await
    }

    async fn create(&self, rating: &Rating) -> RepoResult<()> {
        self.0.create(rating).await
    }

    async fn replace_score(&self, rating: &Rating, expected: Score) -> RepoResult<bool> {
        self.0.replace_score(rating, expected).await
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.0.delete(id).await
    }

    async fn summarize(&self, recipe_id: Snowflake) -> RepoResult<RatingStats> {
        self.0.summarize(recipe_id).await
    }
}

#[tokio::test]
async fn test_racing_updates_of_one_rating_keep_statistics_exact() {
    let store = MemoryStore::new();
    let ctx = memory_context_with_ratings(&store, Arc::new(InterleavedReads(store.ratings())))
        .unwrap();
    let recipe_id = ctx.generate_id();
    store.insert_recipe(recipe_entity(recipe_id, user(0)));

    let service = RatingService::new(&ctx);
    let rating = service.create(recipe_id, user(1), 2).await.unwrap();
    let rating_id = id_of(&rating.id);

    let (first, second) = tokio::join!(
        service.update(rating_id, rescore(5)),
        service.update(rating_id, rescore(3)),
    );
    first.unwrap();
    second.unwrap();

    let stored = store.rating(rating_id).unwrap().score;
    let stats = store.recipe(recipe_id).unwrap().rating_stats();
    assert_eq!(stats.count, 1);
    assert!(
        (stats.average - stored.as_f64()).abs() < EPSILON,
        "average {} does not match stored score {stored:?}",
        stats.average
    );
}
