//! Integration tests for the authenticated exchange endpoints

mod common;

use common::{
    bearer_claims, order_json, private_client, public_client, sha512_hex, ACCESS_KEY,
    ACCOUNTS_RESPONSE,
};
use rust_decimal_macros::dec;
use upbit_rest::{
    ClosedOrdersRequest, GeneratedAddress, GetOrdersRequest, OrderId, OrderSide, OrderState, PlaceOrderRequest,
    RecoveryStrategy, RestError, TransferListRequest, UpbitErrorCode, WithdrawCoinRequest,
};
use wiremock::matchers::{body_string, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_accounts_signed_without_query_hash() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ACCOUNTS_RESPONSE, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let accounts = private_client(&server).get_accounts().await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[1].currency, "BTC");
    assert_eq!(accounts[1].total(), dec!(0.6));

    let requests = server.received_requests().await.unwrap();
    let claims = bearer_claims(&requests[0]);
    assert_eq!(claims.access_key, ACCESS_KEY);
    assert!(claims.query_hash.is_none());
    assert!(claims.query_hash_alg.is_none());
}

#[tokio::test]
async fn test_query_hash_matches_sent_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("market", "KRW-BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            order_json("u-1", "wait"),
            order_json("u-2", "watch"),
        ])))
        .mount(&server)
        .await;

    let request = GetOrdersRequest::new()
        .market("KRW-BTC")
        .uuid("u-1")
        .uuid("u-2")
        .states([OrderState::Wait, OrderState::Watch]);
    let orders = private_client(&server)
        .trading()
        .get_orders(&request)
        .await
        .unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[1].state, OrderState::Watch);

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert_eq!(
        query,
        "market=KRW-BTC&states%5B%5D=wait&states%5B%5D=watch&uuids%5B%5D=u-1&uuids%5B%5D=u-2"
    );

    let claims = bearer_claims(&requests[0]);
    assert_eq!(claims.query_hash, Some(sha512_hex(query.as_bytes())));
    assert_eq!(claims.query_hash_alg.as_deref(), Some("SHA512"));
}

#[tokio::test]
async fn test_place_order_hashes_form_body() {
    let server = MockServer::start().await;
    let expected_body = "identifier=bot-1&market=KRW-BTC&ord_type=limit&price=95000000&side=bid&volume=0.01";
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(expected_body))
        .respond_with(ResponseTemplate::new(201).set_body_json(order_json("new-uuid", "wait")))
        .expect(1)
        .mount(&server)
        .await;

    let order = PlaceOrderRequest::limit("KRW-BTC", OrderSide::Bid, dec!(0.01), dec!(95000000))
        .with_identifier("bot-1");
    let placed = private_client(&server).place_order(&order).await.unwrap();

    assert_eq!(placed.uuid, "new-uuid");
    assert_eq!(placed.price, Some(dec!(95000000)));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
    let claims = bearer_claims(&requests[0]);
    assert_eq!(claims.query_hash, Some(sha512_hex(expected_body.as_bytes())));
}

#[tokio::test]
async fn test_invalid_order_not_sent() {
    let server = MockServer::start().await;

    let mut order = PlaceOrderRequest::market_buy("KRW-BTC", dec!(10000));
    order.volume = Some(dec!(1));
    let err = private_client(&server).place_order(&order).await.unwrap_err();

    assert!(matches!(err, RestError::InvalidParameter(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cancel_order_uuid_in_url_not_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/order"))
        .and(query_param("uuid", "cancel-me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("cancel-me", "wait")))
        .expect(1)
        .mount(&server)
        .await;

    let order = private_client(&server)
        .cancel_order(&OrderId::uuid("cancel-me"))
        .await
        .unwrap();
    assert_eq!(order.uuid, "cancel-me");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    assert_eq!(
        bearer_claims(&requests[0]).query_hash,
        Some(sha512_hex(b"uuid=cancel-me"))
    );
}

#[tokio::test]
async fn test_get_order_by_identifier() {
    let server = MockServer::start().await;
    let mut detail = order_json("u-9", "done");
    detail["trades"] = serde_json::json!([{
        "market": "KRW-BTC",
        "uuid": "trade-1",
        "price": "95000000",
        "volume": "0.01",
        "funds": "950000",
        "side": "bid",
        "created_at": "2024-01-01T00:00:01+09:00"
    }]);

    Mock::given(method("GET"))
        .and(path("/order"))
        .and(query_param("identifier", "bot-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail))
        .mount(&server)
        .await;

    let detail = private_client(&server)
        .trading()
        .get_order(&OrderId::identifier("bot-9"))
        .await
        .unwrap();

    assert!(detail.order.is_closed());
    assert_eq!(detail.trades.len(), 1);
    assert_eq!(detail.trades[0].funds, dec!(950000));
}

#[tokio::test]
async fn test_auth_failure_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"name": "jwt_verification_fail", "message": "Failed to verify Jwt token."}
        })))
        .mount(&server)
        .await;

    let err = private_client(&server).get_accounts().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.api_error_name(), Some("jwt_verification_fail"));
    assert_eq!(err.recovery_strategy(), RecoveryStrategy::Reauthenticate);
    assert!(matches!(
        err,
        RestError::Api {
            code: UpbitErrorCode::JwtVerificationFailed,
            ..
        }
    ));
}

#[tokio::test]
async fn test_empty_credentials_still_send_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"name": "unauthorized", "message": "no key"}
        })))
        .mount(&server)
        .await;

    let err = public_client(&server).get_accounts().await.unwrap_err();
    assert_eq!(err.api_error_name(), Some("unauthorized"));

    let requests = server.received_requests().await.unwrap();
    let claims = bearer_claims(&requests[0]);
    assert_eq!(claims.access_key, "");
}

#[tokio::test]
async fn test_withdraw_coin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/withdraws/coin"))
        .and(body_string(
            "address=rAddr&amount=25.5&currency=XRP&net_type=XRP&secondary_address=12345",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "type": "withdraw",
            "uuid": "w-1",
            "currency": "XRP",
            "net_type": "XRP",
            "txid": null,
            "state": "WAITING",
            "created_at": "2024-01-01T00:00:00+09:00",
            "done_at": null,
            "amount": "25.5",
            "fee": "1",
            "transaction_type": "default"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = WithdrawCoinRequest::new("XRP", "XRP", dec!(25.5), "rAddr")
        .with_secondary_address("12345");
    let withdraw = private_client(&server)
        .funding()
        .withdraw_coin(&request)
        .await
        .unwrap();

    assert_eq!(withdraw.uuid, "w-1");
    assert_eq!(withdraw.amount, dec!(25.5));
    assert!(withdraw.done_at.is_none());
}

#[tokio::test]
async fn test_list_deposits_joins_uuids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deposits"))
        .and(query_param("currency", "BTC"))
        .and(query_param("uuids", "d-1,d-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let deposits = private_client(&server)
        .funding()
        .get_deposits(&TransferListRequest::new().currency("BTC").uuid("d-1").uuid("d-2"))
        .await
        .unwrap();
    assert!(deposits.is_empty());
}

#[tokio::test]
async fn test_generate_deposit_address_pending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/deposits/generate_coin_address"))
        .and(body_string("currency=BTC&net_type=BTC"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "success": true,
            "message": "BTC 입금주소를 생성중입니다."
        })))
        .mount(&server)
        .await;

    let generated = private_client(&server)
        .funding()
        .generate_deposit_address("BTC", "BTC")
        .await
        .unwrap();

    assert!(matches!(generated, GeneratedAddress::Pending { success: true, .. }));
    assert!(generated.address().is_none());
}

#[tokio::test]
async fn test_rate_limited_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/chance"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"name": "too_many_requests", "message": "Too many API requests."}
        })))
        .mount(&server)
        .await;

    let err = private_client(&server)
        .trading()
        .get_order_chance("KRW-BTC")
        .await
        .unwrap_err();

    assert!(err.is_rate_limited());
    assert!(err.is_retryable());
    // the client itself never retries
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_wallet_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/wallet"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "currency": "BTC",
            "wallet_state": "working",
            "block_state": "normal",
            "block_height": 830000,
            "block_updated_at": "2024-01-01T00:00:00.000+00:00",
            "block_elapsed_minutes": 3,
            "net_type": "BTC",
            "network_name": "Bitcoin"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let statuses = private_client(&server)
        .account()
        .get_wallet_status()
        .await
        .unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].wallet_state, "working");
    assert_eq!(statuses[0].block_height, Some(830000));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
    assert!(bearer_claims(&requests[0]).query_hash.is_none());
}

#[tokio::test]
async fn test_get_api_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api_keys"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "access_key": ACCESS_KEY,
            "expire_at": "2025-01-01T00:00:00+09:00"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let keys = private_client(&server).account().get_api_keys().await.unwrap();
    assert_eq!(keys[0].access_key, ACCESS_KEY);
}

#[tokio::test]
async fn test_get_order_chance() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/chance"))
        .and(query_param("market", "KRW-BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "bid_fee": "0.0005",
            "ask_fee": "0.0005",
            "maker_bid_fee": "0.0005",
            "maker_ask_fee": "0.0005",
            "market": {
                "id": "KRW-BTC",
                "name": "BTC/KRW",
                "order_types": [],
                "ask_types": ["limit", "market"],
                "bid_types": ["limit", "price"],
                "order_sides": ["ask", "bid"],
                "bid": {"currency": "KRW", "min_total": "5000"},
                "ask": {"currency": "BTC", "min_total": "5000"},
                "max_total": "1000000000",
                "state": "active"
            },
            "bid_account": {
                "currency": "KRW",
                "balance": "1000000.0",
                "locked": "0.0",
                "avg_buy_price": "0",
                "avg_buy_price_modified": false,
                "unit_currency": "KRW"
            },
            "ask_account": {
                "currency": "BTC",
                "balance": "0.5",
                "locked": "0.0",
                "avg_buy_price": "95000000",
                "avg_buy_price_modified": false,
                "unit_currency": "KRW"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let chance = private_client(&server)
        .trading()
        .get_order_chance("KRW-BTC")
        .await
        .unwrap();

    assert_eq!(chance.bid_fee, dec!(0.0005));
    let market = chance.market.expect("market section");
    assert_eq!(market.id, "KRW-BTC");
    assert_eq!(market.bid_types, vec!["limit", "price"]);
    assert_eq!(market.bid.map(|c| c.min_total), Some(dec!(5000)));
    assert_eq!(market.max_total, Some(dec!(1000000000)));
    assert_eq!(chance.ask_account.map(|a| a.balance), Some(dec!(0.5)));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        bearer_claims(&requests[0]).query_hash,
        Some(sha512_hex(b"market=KRW-BTC"))
    );
}

#[tokio::test]
async fn test_get_closed_orders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/closed"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([order_json("c-1", "done")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = ClosedOrdersRequest::new()
        .market("KRW-BTC")
        .states([OrderState::Done, OrderState::Cancel])
        .limit(10);
    let orders = private_client(&server)
        .trading()
        .get_closed_orders(&request)
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert!(orders[0].is_closed());

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert_eq!(
        query,
        "limit=10&market=KRW-BTC&states%5B%5D=done&states%5B%5D=cancel"
    );
    assert_eq!(
        bearer_claims(&requests[0]).query_hash,
        Some(sha512_hex(query.as_bytes()))
    );
}

#[tokio::test]
async fn test_get_withdraw_chance() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/withdraws/chance"))
        .and(query_param("currency", "XRP"))
        .and(query_param("net_type", "XRP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "member_level": {
                "security_level": 3,
                "fee_level": 0,
                "email_verified": true,
                "identity_auth_verified": true,
                "bank_account_verified": true,
                "kakao_pay_auth_verified": false,
                "locked": false,
                "wallet_locked": false
            },
            "currency": {
                "code": "XRP",
                "withdraw_fee": "1",
                "is_coin": true,
                "wallet_state": "working",
                "wallet_support": ["deposit", "withdraw"]
            },
            "withdraw_limit": {
                "currency": "XRP",
                "minimum": "21",
                "onetime": null,
                "daily": "10000",
                "remaining_daily": "10000",
                "fixed": 6,
                "can_withdraw": true
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let chance = private_client(&server)
        .funding()
        .get_withdraw_chance("XRP", Some("XRP"))
        .await
        .unwrap();

    assert_eq!(chance.member_level.map(|l| l.security_level), Some(3));
    assert_eq!(chance.currency.map(|c| c.withdraw_fee), Some(dec!(1)));
    let limit = chance.withdraw_limit.expect("withdraw limit");
    assert_eq!(limit.minimum, Some(dec!(21)));
    assert!(limit.onetime.is_none());
    assert!(limit.can_withdraw);
    assert!(chance.account.is_none());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        bearer_claims(&requests[0]).query_hash,
        Some(sha512_hex(b"currency=XRP&net_type=XRP"))
    );
}

#[tokio::test]
async fn test_withdraw_krw() {
    let server = MockServer::start().await;
    let expected_body = "amount=10000&two_factor_type=kakao";
    Mock::given(method("POST"))
        .and(path("/withdraws/krw"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(expected_body))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "type": "withdraw",
            "uuid": "krw-1",
            "currency": "KRW",
            "net_type": null,
            "txid": "tx-krw-1",
            "state": "PROCESSING",
            "created_at": "2024-01-01T00:00:00+09:00",
            "done_at": null,
            "amount": "10000",
            "fee": "1000",
            "transaction_type": "default"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let withdraw = private_client(&server)
        .funding()
        .withdraw_krw(dec!(10000), Some("kakao"))
        .await
        .unwrap();

    assert_eq!(withdraw.uuid, "krw-1");
    assert_eq!(withdraw.kind, "withdraw");
    assert_eq!(withdraw.fee, dec!(1000));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
    assert_eq!(
        bearer_claims(&requests[0]).query_hash,
        Some(sha512_hex(expected_body.as_bytes()))
    );
}

#[tokio::test]
async fn test_withdraw_krw_rejects_non_positive_amount() {
    let server = MockServer::start().await;

    let err = private_client(&server)
        .funding()
        .withdraw_krw(dec!(0), None)
        .await
        .unwrap_err();

    assert!(matches!(err, RestError::InvalidParameter(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
