//! Query and ranking engine integration tests over an in-memory database

use chrono::{DateTime, Duration, TimeZone, Utc};
use encore_common::db::{artists, init, notes, shows, users, venues};
use encore_common::Error;
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    init::connect_memory().await.unwrap()
}

fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap() + Duration::days(offset)
}

async fn seed_user(pool: &SqlitePool, username: &str) -> i64 {
    users::create_user(
        pool,
        username,
        &format!("{}@example.com", username),
        "Test",
        "User",
        "qwertyuiop",
    )
    .await
    .unwrap()
}

async fn seed_show(pool: &SqlitePool, artist: &str, venue: &str, date: DateTime<Utc>) -> i64 {
    let artist_id = artists::upsert_artist_by_name(pool, artist).await.unwrap();
    let venue_id = venues::upsert_venue_by_name(pool, venue, "Minneapolis", "Minnesota")
        .await
        .unwrap();
    shows::create_show(pool, artist_id, venue_id, date)
        .await
        .unwrap()
}

#[tokio::test]
async fn artist_search_returns_case_insensitive_substring_matches_in_order() {
    let pool = test_pool().await;
    for name in ["Neko Case", "REM", "The National", "nirvana", "Low"] {
        artists::upsert_artist_by_name(&pool, name).await.unwrap();
    }

    let hits = artists::list_artists(&pool, Some("n")).await.unwrap();
    let names: Vec<&str> = hits.iter().map(|a| a.name.as_str()).collect();
    // Every name containing n/N, ascending ordinal order (uppercase first)
    assert_eq!(names, vec!["Neko Case", "The National", "nirvana"]);
}

#[tokio::test]
async fn artist_search_with_no_matches_is_empty_not_an_error() {
    let pool = test_pool().await;
    artists::upsert_artist_by_name(&pool, "Low").await.unwrap();

    let hits = artists::list_artists(&pool, Some("zzz")).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn artist_list_without_search_is_all_artists_ascending() {
    let pool = test_pool().await;
    for name in ["Wilco", "Beck", "alt-J"] {
        artists::upsert_artist_by_name(&pool, name).await.unwrap();
    }

    let all = artists::list_artists(&pool, None).await.unwrap();
    let names: Vec<&str> = all.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Beck", "Wilco", "alt-J"]);
}

#[tokio::test]
async fn venue_search_matches_substring() {
    let pool = test_pool().await;
    for name in ["First Avenue", "The Armory", "Fine Line"] {
        venues::upsert_venue_by_name(&pool, name, "Minneapolis", "Minnesota")
            .await
            .unwrap();
    }

    let hits = venues::list_venues(&pool, Some("fi")).await.unwrap();
    let names: Vec<&str> = hits.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Fine Line", "First Avenue"]);
}

#[tokio::test]
async fn upsert_by_name_never_duplicates() {
    let pool = test_pool().await;
    let first = artists::upsert_artist_by_name(&pool, "Low").await.unwrap();
    let second = artists::upsert_artist_by_name(&pool, "Low").await.unwrap();
    assert_eq!(first, second);

    let all = artists::list_artists(&pool, None).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn shows_for_artist_are_most_recent_first() {
    let pool = test_pool().await;
    let artist_id = artists::upsert_artist_by_name(&pool, "Low").await.unwrap();
    let venue_id = venues::upsert_venue_by_name(&pool, "First Avenue", "Minneapolis", "Minnesota")
        .await
        .unwrap();

    let older = shows::create_show(&pool, artist_id, venue_id, day(0))
        .await
        .unwrap();
    let newer = shows::create_show(&pool, artist_id, venue_id, day(10))
        .await
        .unwrap();

    let listed = shows::shows_for_artist(&pool, artist_id).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![newer, older]);
}

#[tokio::test]
async fn shows_for_unknown_artist_is_not_found() {
    let pool = test_pool().await;
    let err = shows::shows_for_artist(&pool, 999).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn shows_at_unknown_venue_is_not_found() {
    let pool = test_pool().await;
    let err = shows::shows_at_venue(&pool, 999).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn latest_notes_are_newest_first_and_truncated() {
    let pool = test_pool().await;
    let user_id = seed_user(&pool, "alice").await;
    let show_id = seed_show(&pool, "Low", "First Avenue", day(0)).await;

    let mut created = Vec::new();
    for i in 0..25 {
        let id = notes::create_note(
            &pool,
            show_id,
            user_id,
            &format!("note {}", i),
            "text",
            day(0) + Duration::minutes(i),
        )
        .await
        .unwrap();
        created.push(id);
    }

    let latest = notes::latest_notes(&pool, notes::LATEST_NOTES_LIMIT)
        .await
        .unwrap();
    assert_eq!(latest.len(), 20);
    // Newest first: the last created note leads the feed
    assert_eq!(latest[0].id, *created.last().unwrap());
    assert!(latest.windows(2).all(|w| w[0].posted_date >= w[1].posted_date));
}

#[tokio::test]
async fn notes_for_unknown_show_is_not_found() {
    let pool = test_pool().await;
    let err = notes::notes_for_show(&pool, 42).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn notes_for_show_only_contain_that_show() {
    let pool = test_pool().await;
    let user_id = seed_user(&pool, "alice").await;
    let show_a = seed_show(&pool, "Low", "First Avenue", day(0)).await;
    let show_b = seed_show(&pool, "Beck", "The Armory", day(1)).await;

    notes::create_note(&pool, show_a, user_id, "a", "t", day(2))
        .await
        .unwrap();
    notes::create_note(&pool, show_b, user_id, "b", "t", day(2))
        .await
        .unwrap();

    let for_a = notes::notes_for_show(&pool, show_a).await.unwrap();
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].title, "a");
}

#[tokio::test]
async fn top_shows_excludes_shows_with_zero_notes() {
    let pool = test_pool().await;
    let user_id = seed_user(&pool, "alice").await;
    let noted = seed_show(&pool, "Low", "First Avenue", day(0)).await;
    let _bare = seed_show(&pool, "Beck", "The Armory", day(5)).await;

    notes::create_note(&pool, noted, user_id, "t", "x", day(1))
        .await
        .unwrap();

    let top = shows::top_shows(&pool, shows::TOP_SHOWS_LIMIT).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, noted);
    assert_eq!(top[0].note_count, 1);
}

#[tokio::test]
async fn top_shows_orders_by_date_desc_then_note_count() {
    let pool = test_pool().await;
    let user_id = seed_user(&pool, "alice").await;

    // Older show with many notes, newer show with one note: the newer
    // show still ranks first (date is the primary key)
    let older = seed_show(&pool, "Low", "First Avenue", day(0)).await;
    let newer = seed_show(&pool, "Beck", "The Armory", day(10)).await;
    let same_day_busy = seed_show(&pool, "Wilco", "Fine Line", day(10)).await;

    for i in 0..3 {
        notes::create_note(&pool, older, user_id, "t", "x", day(11) + Duration::minutes(i))
            .await
            .unwrap();
    }
    notes::create_note(&pool, newer, user_id, "t", "x", day(11))
        .await
        .unwrap();
    notes::create_note(&pool, same_day_busy, user_id, "t", "x", day(11))
        .await
        .unwrap();
    notes::create_note(&pool, same_day_busy, user_id, "t", "x", day(12))
        .await
        .unwrap();

    let top = shows::top_shows(&pool, 5).await.unwrap();
    let ids: Vec<i64> = top.iter().map(|s| s.id).collect();
    // day(10) shows before day(0); among the day(10) pair the one with
    // more notes comes first
    assert_eq!(ids, vec![same_day_busy, newer, older]);
    assert_eq!(top[0].note_count, 2);
    assert_eq!(top[2].note_count, 3);
}

#[tokio::test]
async fn top_shows_exposes_latest_note_id_for_deep_linking() {
    let pool = test_pool().await;
    let user_id = seed_user(&pool, "alice").await;
    let show = seed_show(&pool, "Low", "First Avenue", day(0)).await;

    notes::create_note(&pool, show, user_id, "first", "x", day(1))
        .await
        .unwrap();
    let latest = notes::create_note(&pool, show, user_id, "second", "x", day(2))
        .await
        .unwrap();

    let top = shows::top_shows(&pool, 5).await.unwrap();
    assert_eq!(top[0].latest_note_id, latest);
}

#[tokio::test]
async fn top_shows_returns_fewer_than_limit_without_padding() {
    let pool = test_pool().await;
    let user_id = seed_user(&pool, "alice").await;
    for i in 0..3 {
        let show = seed_show(
            &pool,
            &format!("Artist {}", i),
            &format!("Venue {}", i),
            day(i),
        )
        .await;
        notes::create_note(&pool, show, user_id, "t", "x", day(10))
            .await
            .unwrap();
    }

    let top = shows::top_shows(&pool, 5).await.unwrap();
    assert_eq!(top.len(), 3);
}

#[tokio::test]
async fn duplicate_username_detection_can_exclude_self() {
    let pool = test_pool().await;
    let alice = seed_user(&pool, "alice").await;
    seed_user(&pool, "bob").await;

    assert!(users::username_in_use(&pool, "bob", None).await.unwrap());
    assert!(users::username_in_use(&pool, "bob", Some(alice)).await.unwrap());
    // A user keeping their own username is not a conflict
    assert!(!users::username_in_use(&pool, "alice", Some(alice)).await.unwrap());
}
