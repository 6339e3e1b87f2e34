//! Endpoint directory through the typed client.
//!
//! Uses the recording transport, so each test sees exactly the requests the
//! client issued and nothing else.

use serde_json::json;
use ticketweb_client::{ApiClient, ClientConfig, ClientError, Endpoint, Method, OPERATIONS};
use ticketweb_harness::RecordingTransport;
use ticketweb_proto::{
    Amount, NewPayment, NewReservation, PaymentMethod, QueryParams, ReservationStatus,
};

fn logged_in() -> (ApiClient<RecordingTransport>, RecordingTransport) {
    let transport = RecordingTransport::new();
    let config = ClientConfig::default().with_token(Some("tok".into()));
    (ApiClient::new(config, transport.clone()), transport)
}

#[tokio::test]
async fn add_company_is_one_post_with_payload() {
    let (client, transport) = logged_in();
    let payload = json!({"name": "Futa", "phone": "1900"});
    let reply = json!({"id": 7, "name": "Futa", "extra": [1, 2]});
    transport.respond_with(reply.clone());

    let result = client.call(Endpoint::AddCompany(payload.clone())).await.unwrap();

    assert_eq!(result, reply);
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].path, "companies/");
    assert_eq!(requests[0].body, Some(payload));
}

#[tokio::test]
async fn failures_propagate_unaltered() {
    let (client, transport) = logged_in();
    let failure = ClientError::Transport { reason: "connection reset".into() };
    transport.fail_with(failure.clone());

    assert_eq!(client.call(Endpoint::ListBuses(QueryParams::new())).await, Err(failure));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn repeated_calls_are_not_deduplicated() {
    let (client, transport) = logged_in();

    for _ in 0..3 {
        client.call(Endpoint::ListPromotions).await.unwrap();
    }

    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn every_operation_resolves_to_its_catalog_entry() {
    let (client, transport) = logged_in();
    let endpoints = vec![
        Endpoint::Login(json!({})),
        Endpoint::Register(json!({})),
        Endpoint::ChangePassword(json!({})),
        Endpoint::GetProfile,
        Endpoint::UpdateProfile(json!({})),
        Endpoint::ListCompanies,
        Endpoint::CompanyDetail(1),
        Endpoint::AddCompany(json!({})),
        Endpoint::ListBuses(QueryParams::new()),
        Endpoint::BusDetail(1),
        Endpoint::AddBus(json!({})),
        Endpoint::ListRoutes,
        Endpoint::RouteDetail(1),
        Endpoint::ListSchedules(QueryParams::new()),
        Endpoint::ScheduleDetail(1),
        Endpoint::ScheduleSeats(1),
        Endpoint::CreateReservation(json!({})),
        Endpoint::ListUserReservations,
        Endpoint::ReservationDetail(1),
        Endpoint::CreatePayment(json!({})),
        Endpoint::PaymentDetail(1),
        Endpoint::ListPromotions,
        Endpoint::CheckPromotion("X".into()),
        Endpoint::ListNotifications,
        Endpoint::ChatMessages,
        Endpoint::SendChat(json!({})),
        Endpoint::AiSuggest(json!({})),
    ];
    assert_eq!(endpoints.len(), OPERATIONS.len());

    for (endpoint, operation) in endpoints.into_iter().zip(OPERATIONS) {
        assert_eq!(endpoint.name(), operation.name);
        client.call(endpoint).await.unwrap();
    }

    for (request, operation) in transport.requests().iter().zip(OPERATIONS) {
        assert_eq!(request.operation, operation.name);
        assert_eq!(request.method, operation.method);
        let expected = operation.path.replace("{id}", "1").replace("{code}", "X");
        assert_eq!(request.path, expected);
        let authorized = request.header("Authorization").is_some();
        assert_eq!(authorized, operation.name != "auth.login", "{}", operation.name);
    }
}

#[tokio::test]
async fn login_encodes_password_grant() {
    let transport = RecordingTransport::new();
    let config = ClientConfig::default()
        .with_token(Some("stale".into()))
        .with_oauth_client(Some("app".into()), Some("s3cret".into()));
    let client = ApiClient::new(config, transport.clone());
    transport.respond_with(json!({"access_token": "fresh", "expires_in": 36000}));

    let token = client.login("lan", "pw").await.unwrap();

    assert_eq!(token.access_token, "fresh");
    assert_eq!(token.expires_in, Some(36000));
    let request = &transport.requests()[0];
    assert_eq!(request.header("Authorization"), None);
    assert_eq!(
        request.body,
        Some(json!({
            "grant_type": "password",
            "username": "lan",
            "password": "pw",
            "client_id": "app",
            "client_secret": "s3cret"
        }))
    );
    // Logging in does not switch the client's own credential
    assert_eq!(client.config().token(), Some("stale"));
}

#[tokio::test]
async fn booking_and_payment_round() {
    let (client, transport) = logged_in();
    transport.respond_with(json!({
        "id": 41,
        "schedule": 12,
        "booking_code": "BK-41",
        "status": "pending",
        "total_amount": "450000.00"
    }));
    transport.respond_with(json!({
        "id": 5,
        "reservation": 41,
        "amount": "450000.00",
        "payment_method": "momo",
        "status": "pending"
    }));

    let reservation = client
        .create_reservation(&NewReservation {
            schedule: 12,
            seats: vec![3, 4],
            note: None,
            promotion_code: Some("TET".into()),
        })
        .await
        .unwrap();
    assert_eq!(reservation.booking_code.as_deref(), Some("BK-41"));
    assert_eq!(reservation.status, ReservationStatus::Pending);

    let payment = client
        .create_payment(&NewPayment {
            reservation: reservation.id,
            amount: Amount::from("450000.00"),
            payment_method: PaymentMethod::Momo,
        })
        .await
        .unwrap();
    assert_eq!(payment.payment_method, PaymentMethod::Momo);

    let requests = transport.requests();
    assert_eq!(requests[0].path, "reservations/");
    assert_eq!(requests[0].body.as_ref().unwrap()["seats"], json!([3, 4]));
    assert_eq!(requests[1].path, "payments/");
    assert_eq!(requests[1].body.as_ref().unwrap()["payment_method"], "momo");
}

#[tokio::test]
async fn set_token_applies_to_next_request() {
    let (mut client, transport) = logged_in();

    client.set_token(None);
    client.call(Endpoint::GetProfile).await.unwrap();
    client.set_token(Some("other".into()));
    client.call(Endpoint::GetProfile).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].header("Authorization"), None);
    assert_eq!(requests[1].header("Authorization"), Some("Bearer other"));
}

#[tokio::test]
async fn wrong_shape_is_decode_error() {
    let (client, transport) = logged_in();
    transport.respond_with(json!({"detail": "not a list"}));

    let err = client.companies().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}
