use serde_json::json;

use crate::common::{TestApp, routes};

mod access_control {
    use super::*;

    #[tokio::test]
    async fn regular_user_cannot_call_admin_endpoints() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app.get_with_token(routes::ADMIN_USERS, &token).await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");

        let res = app
            .post_with_token(&routes::admin_ban(1), &json!({}), &token)
            .await;
        assert_eq!(res.status, 403);

        let res = app.delete_with_token(&routes::admin_photo(1), &token).await;
        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn admin_endpoints_require_a_token() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ADMIN_USERS).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }
}

mod user_management {
    use super::*;

    #[tokio::test]
    async fn admin_can_list_all_users() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("alice", "securepass").await;
        app.create_authenticated_user("bob", "securepass").await;
        let admin = app.create_admin_user("root", "adminpass").await;

        let res = app.get_with_token(routes::ADMIN_USERS, &admin).await;

        assert_eq!(res.status, 200);
        let users = res.body.as_array().unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0]["username"], "alice");
        assert_eq!(users[2]["username"], "root");
        assert_eq!(users[2]["is_admin"], true);
    }

    #[tokio::test]
    async fn ban_and_unban_round_trip() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("alice", "securepass").await;
        let admin = app.create_admin_user("root", "adminpass").await;

        let users = app.get_with_token(routes::ADMIN_USERS, &admin).await;
        let alice_id = users.body.as_array().unwrap()[0]["id"].as_i64().unwrap() as i32;

        let res = app
            .post_with_token(&routes::admin_ban(alice_id), &json!({}), &admin)
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "User alice has been banned");

        let login = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "alice", "password": "securepass"}),
            )
            .await;
        assert_eq!(login.status, 403);

        let res = app
            .post_with_token(&routes::admin_unban(alice_id), &json!({}), &admin)
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "User alice has been unbanned");

        let login = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "alice", "password": "securepass"}),
            )
            .await;
        assert_eq!(login.status, 200);
    }

    #[tokio::test]
    async fn admin_cannot_ban_themselves() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin_user("root", "adminpass").await;

        let me = app.get_with_token(routes::ME, &admin).await;
        let admin_id = me.body["id"].as_i64().unwrap() as i32;

        let res = app
            .post_with_token(&routes::admin_ban(admin_id), &json!({}), &admin)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn banning_unknown_user_is_not_found() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin_user("root", "adminpass").await;

        let res = app
            .post_with_token(&routes::admin_ban(99999), &json!({}), &admin)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod photo_moderation {
    use super::*;
    use sea_orm::EntityTrait;
    use server::entity::vote;

    #[tokio::test]
    async fn admin_can_delete_any_photo_with_cascade() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let admin = app.create_admin_user("root", "adminpass").await;

        let a = app.upload_photo(&alice).await;
        let b = app.upload_photo(&alice).await;
        app.cast_vote(&alice, a, b).await;

        let res = app.delete_with_token(&routes::admin_photo(a), &admin).await;
        assert_eq!(res.status, 204);

        let photos = app.get_with_token(routes::MY_PHOTOS, &alice).await;
        assert_eq!(photos.body.as_array().unwrap().len(), 1);

        let remaining = vote::Entity::find().all(&app.db).await.unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn deleting_unknown_photo_is_not_found() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin_user("root", "adminpass").await;

        let res = app
            .delete_with_token(&routes::admin_photo(99999), &admin)
            .await;

        assert_eq!(res.status, 404);
    }
}
