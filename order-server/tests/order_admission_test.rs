//! Create / edit / get through the admission engine

mod common;

use common::*;
use order_server::OrderError;
use order_server::db::repository::client;

#[tokio::test]
async fn test_create_assigns_increasing_numbers() {
    let ctx = TestContext::new().await;
    let engine = &ctx.state.engine;

    let first = engine.create(TOKEN_A, simple_request(ctx.tenant_a)).await.unwrap();
    let second = engine.create(TOKEN_A, simple_request(ctx.tenant_a)).await.unwrap();

    assert_eq!(first.queue_number, 1);
    assert_eq!(first.order_number, "ORD-0001");
    assert_eq!(second.queue_number, 2);
    assert_eq!(second.order_number, "ORD-0002");
    assert_eq!(first.status, 1);
    assert_eq!(first.status_text, "Incoming");
    assert_eq!(first.order_details.len(), 1);
    assert!(first.order_details[0].id > 0);
    assert_eq!(first.order_details[0].order_id, first.id);
}

#[tokio::test]
async fn test_create_persists_lines_and_total() {
    let ctx = TestContext::new().await;
    let req = request(
        ctx.tenant_a,
        "183.50",
        vec![line(1, "95.25", 1, "95.25"), line(2, "88.25", 1, "88.25")],
    );

    let created = ctx.state.engine.create(TOKEN_A, req).await.unwrap();
    let loaded = ctx.state.engine.get(TOKEN_A, created.id).await.unwrap();

    assert_eq!(loaded.total, dec("183.5"));
    assert_eq!(loaded.order_details.len(), 2);
    assert_eq!(loaded.lines_total(), loaded.total);
    assert_eq!(loaded.customer_name, "Asep");
    assert_eq!(loaded.updated_by, None);
    assert_eq!(ctx.authority.calls(), 2);
}

#[tokio::test]
async fn test_price_mismatch_persists_nothing() {
    let ctx = TestContext::new().await;
    let req = request(ctx.tenant_a, "95.00", vec![line(1, "95.00", 1, "95.00")]);

    let err = ctx.state.engine.create(TOKEN_A, req).await.unwrap_err();
    assert!(matches!(err, OrderError::InvalidProductPrice));
    assert_eq!(ctx.count("SELECT COUNT(*) FROM orders").await, 0);
    assert_eq!(ctx.count("SELECT COUNT(*) FROM order_detail").await, 0);
}

#[tokio::test]
async fn test_total_mismatch() {
    let ctx = TestContext::new().await;
    let req = request(
        ctx.tenant_a,
        "100.50",
        vec![line(1, "95.25", 1, "95.25"), line(2, "88.25", 1, "88.25")],
    );

    let err = ctx.state.engine.create(TOKEN_A, req).await.unwrap_err();
    assert!(matches!(err, OrderError::InvalidTotal));
    assert_eq!(ctx.count("SELECT COUNT(*) FROM orders").await, 0);
}

#[tokio::test]
async fn test_unknown_product() {
    let ctx = TestContext::new().await;
    let req = request(
        ctx.tenant_a,
        "105.25",
        vec![line(1, "95.25", 1, "95.25"), line(77, "10", 1, "10")],
    );

    let err = ctx.state.engine.create(TOKEN_A, req).await.unwrap_err();
    assert!(matches!(err, OrderError::ProductNotFound));
    // Both lookups ran even though one failed
    assert_eq!(ctx.authority.calls(), 2);
    assert_eq!(ctx.count("SELECT COUNT(*) FROM orders").await, 0);
}

#[tokio::test]
async fn test_structural_failure_never_reaches_authority() {
    let ctx = TestContext::new().await;

    let mut req = simple_request(ctx.tenant_a);
    req.customer_name = String::new();
    let err = ctx.state.engine.create(TOKEN_A, req).await.unwrap_err();
    assert!(matches!(err, OrderError::InvalidRequest(_)));

    let mut req = simple_request(ctx.tenant_a);
    req.lines.clear();
    let err = ctx.state.engine.create(TOKEN_A, req).await.unwrap_err();
    assert!(matches!(err, OrderError::InvalidRequest(_)));

    let mut req = simple_request(ctx.tenant_a);
    req.lines[0].quantity = 0;
    let err = ctx.state.engine.create(TOKEN_A, req).await.unwrap_err();
    assert!(matches!(err, OrderError::InvalidRequest(_)));

    assert_eq!(ctx.authority.calls(), 0);
    assert_eq!(ctx.count("SELECT COUNT(*) FROM orders").await, 0);
}

#[tokio::test]
async fn test_missing_credential() {
    let ctx = TestContext::new().await;

    let err = ctx
        .state
        .engine
        .create("", simple_request(ctx.tenant_a))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::MissingCredential));

    let err = ctx.state.engine.get("  ", 1).await.unwrap_err();
    assert!(matches!(err, OrderError::MissingCredential));

    assert_eq!(ctx.authority.calls(), 0);
}

#[tokio::test]
async fn test_edit_replaces_line_set() {
    let ctx = TestContext::new().await;
    let engine = &ctx.state.engine;

    let created = engine.create(TOKEN_A, simple_request(ctx.tenant_a)).await.unwrap();
    let old_line_id = created.order_details[0].id;

    let mut edit = request(
        ctx.tenant_a,
        "25",
        vec![line(3, "10", 2, "20"), line(4, "2.5", 2, "5")],
    );
    edit.customer_name = "Budi".to_string();
    edit.phone_number = "0899".to_string();

    let edited = engine.edit(TOKEN_A, created.id, edit).await.unwrap();
    assert_eq!(edited.id, created.id);
    assert_eq!(edited.order_details.len(), 2);

    let loaded = engine.get(TOKEN_A, created.id).await.unwrap();
    assert_eq!(loaded.customer_name, "Budi");
    assert_eq!(loaded.phone_number, "0899");
    assert_eq!(loaded.total, dec("25"));
    assert_eq!(loaded.order_details.len(), 2);
    assert!(loaded.order_details.iter().all(|l| l.id != old_line_id));
    let products: Vec<i64> = loaded.order_details.iter().map(|l| l.product_id).collect();
    assert_eq!(products, vec![3, 4]);

    assert_eq!(ctx.count("SELECT COUNT(*) FROM order_detail").await, 2);
}

#[tokio::test]
async fn test_edit_resets_status_and_keeps_number() {
    let ctx = TestContext::new().await;
    let engine = &ctx.state.engine;

    let created = engine.create(TOKEN_A, simple_request(ctx.tenant_a)).await.unwrap();
    sqlx::query("UPDATE orders SET status = 3 WHERE id = ?")
        .bind(created.id)
        .execute(&ctx.db.pool)
        .await
        .unwrap();
    assert_eq!(engine.get(TOKEN_A, created.id).await.unwrap().status_text, "Processing");

    let edited = engine
        .edit(TOKEN_A, created.id, simple_request(ctx.tenant_a))
        .await
        .unwrap();
    assert_eq!(edited.status, 1);

    let loaded = engine.get(TOKEN_A, created.id).await.unwrap();
    assert_eq!(loaded.status_text, "Incoming");
    assert_eq!(loaded.order_number, created.order_number);
    assert_eq!(loaded.queue_number, created.queue_number);
    assert_eq!(loaded.created_at, created.created_at);
    assert!(loaded.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_edit_missing_or_foreign_order() {
    let ctx = TestContext::new().await;
    let engine = &ctx.state.engine;

    let created = engine.create(TOKEN_A, simple_request(ctx.tenant_a)).await.unwrap();
    let calls_after_create = ctx.authority.calls();

    let err = engine
        .edit(TOKEN_A, 9999, simple_request(ctx.tenant_a))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::OrderNotFound));

    let mut foreign = request(ctx.tenant_b, "20", vec![line(3, "10", 2, "20")]);
    foreign.customer_name = "Mallory".to_string();
    let err = engine.edit(TOKEN_B, created.id, foreign).await.unwrap_err();
    assert!(matches!(err, OrderError::OrderNotFound));

    // Store untouched, authority never consulted for the rejected edits
    let loaded = engine.get(TOKEN_A, created.id).await.unwrap();
    assert_eq!(loaded.customer_name, "Asep");
    assert_eq!(loaded.order_details.len(), 1);
    assert_eq!(ctx.authority.calls(), calls_after_create);
}

#[tokio::test]
async fn test_edit_with_bad_price_keeps_old_lines() {
    let ctx = TestContext::new().await;
    let engine = &ctx.state.engine;

    let created = engine.create(TOKEN_A, simple_request(ctx.tenant_a)).await.unwrap();
    let edit = request(ctx.tenant_a, "11", vec![line(3, "11", 1, "11")]);

    let err = engine.edit(TOKEN_A, created.id, edit).await.unwrap_err();
    assert!(matches!(err, OrderError::InvalidProductPrice));

    let loaded = engine.get(TOKEN_A, created.id).await.unwrap();
    assert_eq!(loaded.order_details, created.order_details);
}

#[tokio::test]
async fn test_get_is_scoped_to_tenant() {
    let ctx = TestContext::new().await;
    let engine = &ctx.state.engine;

    let created = engine.create(TOKEN_A, simple_request(ctx.tenant_a)).await.unwrap();

    assert!(engine.get(TOKEN_A, created.id).await.is_ok());
    assert!(matches!(
        engine.get(TOKEN_B, created.id).await.unwrap_err(),
        OrderError::OrderNotFound
    ));
    assert!(matches!(
        engine.get("unknown-token", created.id).await.unwrap_err(),
        OrderError::OrderNotFound
    ));
    assert!(matches!(
        engine.get(TOKEN_A, created.id + 100).await.unwrap_err(),
        OrderError::OrderNotFound
    ));
}

#[tokio::test]
async fn test_status_text_derivation() {
    let ctx = TestContext::new().await;
    let engine = &ctx.state.engine;

    let created = engine.create(TOKEN_A, simple_request(ctx.tenant_a)).await.unwrap();
    assert_eq!(engine.get(TOKEN_A, created.id).await.unwrap().status_text, "Incoming");

    for (status, text) in [(2, "Paid"), (4, "Success"), (9, "Unknown")] {
        sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(status)
            .bind(created.id)
            .execute(&ctx.db.pool)
            .await
            .unwrap();
        let loaded = engine.get(TOKEN_A, created.id).await.unwrap();
        assert_eq!(loaded.status, status);
        assert_eq!(loaded.status_text, text);
    }
}

#[tokio::test]
async fn test_create_for_another_client_is_rejected() {
    let ctx = TestContext::new().await;
    let engine = &ctx.state.engine;

    let err = engine
        .create(TOKEN_A, simple_request(ctx.tenant_b))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::ClientMismatch { owner, requested }
            if owner == ctx.tenant_a && requested == ctx.tenant_b
    ));

    let err = engine
        .create("token-nobody", simple_request(ctx.tenant_a))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::UnknownCredential));

    // Nothing stored, no lookups made, and B's first number is still free
    assert_eq!(ctx.authority.calls(), 0);
    assert_eq!(ctx.count("SELECT COUNT(*) FROM orders").await, 0);
    let order = engine.create(TOKEN_B, simple_request(ctx.tenant_b)).await.unwrap();
    assert_eq!(order.order_number, "ORD-0001");
}

#[tokio::test]
async fn test_client_token_lookup() {
    let ctx = TestContext::new().await;

    let found = client::find_id_by_token(&ctx.db.pool, TOKEN_B).await.unwrap();
    assert_eq!(found, Some(ctx.tenant_b));

    let missing = client::find_id_by_token(&ctx.db.pool, "nope").await.unwrap();
    assert_eq!(missing, None);

    // Tokens are unique
    assert!(client::create(&ctx.db.pool, "Dup", TOKEN_A).await.is_err());
}
