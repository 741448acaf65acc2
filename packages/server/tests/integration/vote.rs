use serde_json::json;

use crate::common::{TestApp, routes};

mod vote_casting {
    use super::*;

    #[tokio::test]
    async fn vote_applies_elo_update_to_both_photos() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let winner = app.upload_photo(&token).await;
        let loser = app.upload_photo(&token).await;

        let res = app
            .post_with_token(
                routes::VOTE,
                &json!({"winner_photo_id": winner, "loser_photo_id": loser}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["winner_photo_id"].as_i64().unwrap() as i32, winner);
        assert_eq!(res.body["loser_photo_id"].as_i64().unwrap() as i32, loser);
        assert!(res.body["id"].is_number());

        // Both photos started at 1000: the winner takes exactly K/2 points.
        let photos = app.get_with_token(routes::MY_PHOTOS, &token).await;
        let photos = photos.body.as_array().unwrap();
        let winner_photo = photos
            .iter()
            .find(|p| p["id"].as_i64().unwrap() as i32 == winner)
            .unwrap();
        let loser_photo = photos
            .iter()
            .find(|p| p["id"].as_i64().unwrap() as i32 == loser)
            .unwrap();

        assert_eq!(winner_photo["elo_rating"], 1016.0);
        assert_eq!(winner_photo["wins"], 1);
        assert_eq!(winner_photo["losses"], 0);
        assert_eq!(winner_photo["total_votes"], 1);

        assert_eq!(loser_photo["elo_rating"], 984.0);
        assert_eq!(loser_photo["wins"], 0);
        assert_eq!(loser_photo["losses"], 1);
        assert_eq!(loser_photo["total_votes"], 1);
    }

    #[tokio::test]
    async fn self_vote_is_rejected_without_mutation() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.upload_photo(&token).await;

        let res = app
            .post_with_token(
                routes::VOTE,
                &json!({"winner_photo_id": id, "loser_photo_id": id}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let photos = app.get_with_token(routes::MY_PHOTOS, &token).await;
        let photo = &photos.body.as_array().unwrap()[0];
        assert_eq!(photo["elo_rating"], 1000.0);
        assert_eq!(photo["total_votes"], 0);
    }

    #[tokio::test]
    async fn vote_for_missing_photo_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.upload_photo(&token).await;

        let res = app
            .post_with_token(
                routes::VOTE,
                &json!({"winner_photo_id": id, "loser_photo_id": 99999}),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");

        let res = app
            .post_with_token(
                routes::VOTE,
                &json!({"winner_photo_id": 99999, "loser_photo_id": id}),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn vote_without_token_is_unauthorized() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::VOTE,
                &json!({"winner_photo_id": 1, "loser_photo_id": 2}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn total_votes_always_equals_wins_plus_losses() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let a = app.upload_photo(&token).await;
        let b = app.upload_photo(&token).await;
        let c = app.upload_photo(&token).await;

        for (w, l) in [(a, b), (b, c), (c, a), (a, b), (b, a)] {
            app.cast_vote(&token, w, l).await;
        }

        let photos = app.get_with_token(routes::MY_PHOTOS, &token).await;
        for photo in photos.body.as_array().unwrap() {
            let wins = photo["wins"].as_i64().unwrap();
            let losses = photo["losses"].as_i64().unwrap();
            let total = photo["total_votes"].as_i64().unwrap();
            assert_eq!(total, wins + losses);
        }
    }
}

mod concurrency {
    use super::*;

    /// 100 concurrent votes over 10 photos. Row locking must serialize the
    /// paired updates: every vote lands and no counter update is lost.
    #[tokio::test]
    async fn concurrent_votes_lose_no_updates() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let mut ids = Vec::new();
        for _ in 0..10 {
            ids.push(app.upload_photo(&token).await);
        }

        let mut tasks = Vec::new();
        for i in 0..100u32 {
            let winner = ids[(i as usize) % 10];
            let loser = ids[((i as usize) + 1) % 10];

            let client = app.client.clone();
            let url = format!("http://{}{}", app.addr, routes::VOTE);
            let token = token.clone();
            tasks.push(tokio::spawn(async move {
                let res = client
                    .post(&url)
                    .header("Authorization", format!("Bearer {token}"))
                    .json(&json!({"winner_photo_id": winner, "loser_photo_id": loser}))
                    .send()
                    .await
                    .expect("vote request failed");
                assert_eq!(res.status().as_u16(), 201);
            }));
        }

        for task in futures::future::join_all(tasks).await {
            task.expect("vote task panicked");
        }

        let photos = app.get_with_token(routes::MY_PHOTOS, &token).await;
        let photos = photos.body.as_array().unwrap();
        assert_eq!(photos.len(), 10);

        let total_wins: i64 = photos.iter().map(|p| p["wins"].as_i64().unwrap()).sum();
        let total_losses: i64 = photos.iter().map(|p| p["losses"].as_i64().unwrap()).sum();
        assert_eq!(total_wins, 100);
        assert_eq!(total_losses, 100);

        for photo in photos {
            assert_eq!(
                photo["total_votes"].as_i64().unwrap(),
                photo["wins"].as_i64().unwrap() + photo["losses"].as_i64().unwrap()
            );
        }
    }
}
