use crate::common::{TestApp, routes};

mod ranking {
    use super::*;

    #[tokio::test]
    async fn photos_without_votes_are_excluded() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let voted_a = app.upload_photo(&token).await;
        let voted_b = app.upload_photo(&token).await;
        app.upload_photo(&token).await; // never voted on

        app.cast_vote(&token, voted_a, voted_b).await;

        let res = app.get_without_token(routes::LEADERBOARD).await;

        assert_eq!(res.status, 200);
        let entries = res.body.as_array().unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn higher_rating_ranks_first() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let a = app.upload_photo(&token).await;
        let b = app.upload_photo(&token).await;

        // a beats b twice: a ends well above 1000, b well below.
        app.cast_vote(&token, a, b).await;
        app.cast_vote(&token, a, b).await;

        let res = app.get_without_token(routes::LEADERBOARD).await;

        let entries = res.body.as_array().unwrap();
        assert_eq!(entries[0]["id"].as_i64().unwrap() as i32, a);
        assert_eq!(entries[0]["rank"], 1);
        assert_eq!(entries[1]["id"].as_i64().unwrap() as i32, b);
        assert_eq!(entries[1]["rank"], 2);
        assert!(entries[0]["elo_rating"].as_f64().unwrap() > entries[1]["elo_rating"].as_f64().unwrap());
        assert_eq!(entries[0]["owner_username"], "alice");
    }
}

mod pagination {
    use super::*;

    async fn seed_ranked_photos(app: &TestApp, token: &str, count: usize) -> Vec<i32> {
        let mut ids = Vec::new();
        for _ in 0..count {
            ids.push(app.upload_photo(token).await);
        }
        // Chain of votes so every photo has at least one.
        for pair in ids.windows(2) {
            app.cast_vote(token, pair[0], pair[1]).await;
        }
        ids
    }

    #[tokio::test]
    async fn offset_shifts_ranks_globally() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        seed_ranked_photos(&app, &token, 5).await;

        let res = app
            .get_without_token(&format!("{}?limit=2&offset=2", routes::LEADERBOARD))
            .await;

        assert_eq!(res.status, 200);
        let entries = res.body.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["rank"], 3);
        assert_eq!(entries[1]["rank"], 4);
    }

    #[tokio::test]
    async fn limit_defaults_to_twenty() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        seed_ranked_photos(&app, &token, 25).await;

        let res = app.get_without_token(routes::LEADERBOARD).await;

        assert_eq!(res.body.as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn limit_is_silently_capped_at_one_hundred() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        seed_ranked_photos(&app, &token, 5).await;

        let res = app
            .get_without_token(&format!("{}?limit=5000", routes::LEADERBOARD))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn offset_beyond_end_returns_empty_page() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        seed_ranked_photos(&app, &token, 3).await;

        let res = app
            .get_without_token(&format!("{}?offset=1000", routes::LEADERBOARD))
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body.as_array().unwrap().is_empty());
    }
}
