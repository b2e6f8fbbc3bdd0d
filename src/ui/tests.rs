use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use super::create_router;
use crate::auth::{password, SessionClaims};
use crate::config::Config;
use crate::db::{
    seed_classifications, test_pool, Account, AccountStore, DbPool, InventoryStore, NewAccount,
    VehicleInput,
};
use crate::AppState;

const STRONG_PASSWORD: &str = "Str0ng!Passw0rd123";

struct TestApp {
    router: Router,
    state: Arc<AppState>,
    pool: DbPool,
}

impl TestApp {
    async fn new() -> Self {
        let mut config = Config::default();
        config.auth.token_secret = Some("router-test-token-secret".to_string());
        config.auth.session_secret = Some("router-test-session-secret".to_string());

        let pool = test_pool().await;
        seed_classifications(&pool).await.unwrap();
        let state = Arc::new(AppState::new(config, pool.clone()).unwrap());
        Self {
            router: create_router(state.clone()),
            state,
            pool,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn account(&self, email: &str, password: &str, role: &str) -> Account {
        let password_hash = password::hash(password.to_string()).await.unwrap();
        let account = self
            .state
            .accounts
            .create_account(&NewAccount {
                firstname: "Test".to_string(),
                lastname: "Person".to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
            .unwrap();
        sqlx::query("UPDATE account SET account_type = ? WHERE account_id = ?")
            .bind(role)
            .bind(account.account_id)
            .execute(&self.pool)
            .await
            .unwrap();
        self.state
            .accounts
            .find_by_id(account.account_id)
            .await
            .unwrap()
            .unwrap()
    }

    /// `jwt=...` request cookie for an account
    fn session_cookie(&self, account: &Account) -> String {
        let token = self
            .state
            .tokens
            .issue(&SessionClaims::from(account))
            .unwrap();
        format!("jwt={}", token)
    }
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Value of a cookie named by a Set-Cookie header of the response.
fn set_cookie(response: &Response, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(|v| v.to_string())
}

/// `name=value` pair of a Set-Cookie header, ready to send back.
fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or_default().to_string()
}

fn is_removal(set_cookie: &str) -> bool {
    set_cookie.contains("Max-Age=0")
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[tokio::test]
async fn test_home_page_lists_classifications() {
    let app = TestApp::new().await;
    let response = app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    for name in ["Custom", "Sedan", "Sport", "SUV", "Truck"] {
        assert!(html.contains(name), "missing {}", name);
    }
    assert!(html.contains("/account/login"));
}

#[tokio::test]
async fn test_register_creates_client_account() {
    let app = TestApp::new().await;
    let body = format!(
        "account_firstname=Jane&account_lastname=Doe&account_email=Jane%40Example.com&account_password={}",
        STRONG_PASSWORD.replace('!', "%21")
    );
    let response = app.post("/account/register", &body, None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let html = body_text(response).await;
    assert!(html.contains("registered Jane. Please log in."));

    let account = app
        .state
        .accounts
        .find_by_email("jane@example.com")
        .await
        .unwrap()
        .expect("account stored with lowercased email");
    assert_eq!(account.account_type, crate::db::AccountType::Client);
    assert_ne!(account.account_password, STRONG_PASSWORD);
    assert!(password::verify(STRONG_PASSWORD.to_string(), account.account_password)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_register_role_cannot_be_chosen() {
    let app = TestApp::new().await;
    let body = format!(
        "account_firstname=Eve&account_lastname=Smith&account_email=eve%40example.com&account_password={}&account_type=Admin",
        STRONG_PASSWORD.replace('!', "%21")
    );
    let response = app.post("/account/register", &body, None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let account = app
        .state
        .accounts
        .find_by_email("eve@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(account.account_type, crate::db::AccountType::Client);
}

#[tokio::test]
async fn test_register_empty_first_name_rerenders_with_one_error() {
    let app = TestApp::new().await;
    let body = "account_firstname=&account_lastname=Doe&account_email=a%40b.com&account_password=Str0ng%21Passw0rd123";
    let response = app.post("/account/register", body, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert_eq!(count(&html, "class=\"field-error\""), 1);
    assert!(html.contains("Please provide a first name."));
    assert!(html.contains("value=\"Doe\""));
    assert!(html.contains("value=\"a@b.com\""));
    assert!(!html.contains("Str0ng"));
    assert!(app
        .state
        .accounts
        .find_by_email("a@b.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_register_existing_email_fails_uniqueness() {
    let app = TestApp::new().await;
    app.account("taken@example.com", STRONG_PASSWORD, "Client").await;
    let body = "account_firstname=Jane&account_lastname=Doe&account_email=taken%40example.com&account_password=Str0ng%21Passw0rd123";
    let response = app.post("/account/register", body, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("Email exists. Please log in or use a different email."));
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::new().await;
    let account = app.account("client@example.com", STRONG_PASSWORD, "Client").await;

    let body = "account_email=Client%40Example.com&account_password=Str0ng%21Passw0rd123";
    let response = app.post("/account/login", body, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/account/"));

    let cookie = set_cookie(&response, "jwt").expect("jwt cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=3600"));
    assert!(!cookie.contains("Secure"));

    let pair = cookie_pair(&cookie);
    let token = pair.trim_start_matches("jwt=");
    let claims = app.state.tokens.verify(token).unwrap();
    assert_eq!(claims, SessionClaims::from(&account));

    let response = app.get("/account/", Some(&pair)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Welcome Test"));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.account("known@example.com", STRONG_PASSWORD, "Client").await;

    let wrong_password = app
        .post(
            "/account/login",
            "account_email=known%40example.com&account_password=Wr0ng%21Passw0rd123",
            None,
        )
        .await;
    let unknown_email = app
        .post(
            "/account/login",
            "account_email=nobody%40example.com&account_password=Str0ng%21Passw0rd123",
            None,
        )
        .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&wrong_password, "jwt").is_none());
    assert!(set_cookie(&unknown_email, "jwt").is_none());

    let first = body_text(wrong_password)
        .await
        .replace("known@example.com", "EMAIL");
    let second = body_text(unknown_email)
        .await
        .replace("nobody@example.com", "EMAIL");
    assert!(first.contains("Please check your credentials and try again."));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_login_validation_rerenders() {
    let app = TestApp::new().await;
    let response = app
        .post("/account/login", "account_email=nope&account_password=", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Please provide a valid email address."));
    assert!(html.contains("Please provide a password."));
    assert!(html.contains("value=\"nope\""));
}

#[tokio::test]
async fn test_protected_routes_without_token_redirect_to_login() {
    let app = TestApp::new().await;

    let response = app.get("/account/", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/account/login"));
    let flash = set_cookie(&response, "flash").expect("flash cookie");

    // The notice shows up on the login page
    let response = app.get("/account/login", Some(&cookie_pair(&flash))).await;
    let html = body_text(response).await;
    assert!(html.contains("Please log in."));

    let response = app.get("/inv/", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/account/login"));
    let flash = set_cookie(&response, "flash").unwrap();
    let html = body_text(app.get("/account/login", Some(&cookie_pair(&flash))).await).await;
    assert!(html.contains("Please log in to access that page."));
}

#[tokio::test]
async fn test_client_cannot_reach_staff_routes() {
    let app = TestApp::new().await;
    let client = app.account("client@example.com", STRONG_PASSWORD, "Client").await;
    let cookie = app.session_cookie(&client);

    for uri in ["/inv/", "/inv/add-classification", "/inv/getInventory/1"] {
        let response = app.get(uri, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location(&response), Some("/account/"));
    }

    let response = app
        .post("/inv/add-classification", "classification_name=Hacked", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let flash = set_cookie(&response, "flash").unwrap();
    let html = body_text(app.get("/", Some(&format!("{}; {}", cookie, cookie_pair(&flash)))).await).await;
    assert!(html.contains("You are not authorized to view that page."));
    assert!(!html.contains("Hacked"));
}

#[tokio::test]
async fn test_staff_can_reach_management() {
    let app = TestApp::new().await;
    for role in ["Employee", "Admin"] {
        let staff = app
            .account(&format!("{}@example.com", role.to_lowercase()), STRONG_PASSWORD, role)
            .await;
        let response = app.get("/inv/", Some(&app.session_cookie(&staff))).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", role);
    }
}

#[tokio::test]
async fn test_invalid_token_clears_cookie_and_redirects() {
    let app = TestApp::new().await;
    for uri in ["/", "/account/", "/inv/type/1"] {
        let response = app.get(uri, Some("jwt=not.a.token")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location(&response), Some("/account/login"));
        let cleared = set_cookie(&response, "jwt").expect("jwt removal");
        assert!(is_removal(&cleared));
    }
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = TestApp::new().await;
    let client = app.account("client@example.com", STRONG_PASSWORD, "Client").await;
    let cookie = app.session_cookie(&client);

    let first = app.get("/account/logout", Some(&cookie)).await;
    let second = app.get("/account/logout", None).await;
    for response in [&first, &second] {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(response), Some("/"));
        assert!(is_removal(&set_cookie(response, "jwt").unwrap()));
    }

    let flash = set_cookie(&first, "flash").unwrap();
    let html = body_text(app.get("/", Some(&cookie_pair(&flash))).await).await;
    assert!(html.contains("You have been logged out."));
}

#[tokio::test]
async fn test_profile_update_keeps_own_email() {
    let app = TestApp::new().await;
    let account = app.account("me@example.com", STRONG_PASSWORD, "Client").await;
    let cookie = app.session_cookie(&account);

    let body = format!(
        "account_id={}&account_firstname=Renamed&account_lastname=Person&account_email=me%40example.com",
        account.account_id
    );
    let response = app.post("/account/update", &body, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/account/"));

    // Token is reissued with the new name
    let jwt = cookie_pair(&set_cookie(&response, "jwt").unwrap());
    let claims = app.state.tokens.verify(jwt.trim_start_matches("jwt=")).unwrap();
    assert_eq!(claims.account_firstname, "Renamed");

    let stored = app.state.accounts.find_by_id(account.account_id).await.unwrap().unwrap();
    assert_eq!(stored.account_firstname, "Renamed");
}

#[tokio::test]
async fn test_profile_update_rejects_other_accounts_email() {
    let app = TestApp::new().await;
    let account = app.account("me@example.com", STRONG_PASSWORD, "Client").await;
    app.account("other@example.com", STRONG_PASSWORD, "Client").await;
    let cookie = app.session_cookie(&account);

    let body = format!(
        "account_id={}&account_firstname=Me&account_lastname=Person&account_email=other%40example.com",
        account.account_id
    );
    let response = app.post("/account/update", &body, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("That email already exists. Please use another."));
    assert_eq!(count(&html, "class=\"field-error\""), 1);
}

#[tokio::test]
async fn test_profile_update_for_another_account_is_refused() {
    let app = TestApp::new().await;
    let me = app.account("me@example.com", STRONG_PASSWORD, "Client").await;
    let victim = app.account("victim@example.com", STRONG_PASSWORD, "Client").await;
    let cookie = app.session_cookie(&me);

    let body = format!(
        "account_id={}&account_firstname=Owned&account_lastname=Person&account_email=victim%40example.com",
        victim.account_id
    );
    let response = app.post("/account/update", &body, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/account/"));

    let stored = app.state.accounts.find_by_id(victim.account_id).await.unwrap().unwrap();
    assert_eq!(stored.account_firstname, "Test");

    let response = app
        .get(&format!("/account/update/{}", victim.account_id), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_password_update() {
    let app = TestApp::new().await;
    let account = app.account("me@example.com", STRONG_PASSWORD, "Client").await;
    let cookie = app.session_cookie(&account);

    let weak = format!("account_id={}&account_password=short", account.account_id);
    let response = app.post("/account/update-password", &weak, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("Password must be at least 12 characters long."));

    let strong = format!(
        "account_id={}&account_password=N3w%21Passw0rd456",
        account.account_id
    );
    let response = app.post("/account/update-password", &strong, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/account/"));
    assert!(set_cookie(&response, "jwt").is_none());

    let stored = app.state.accounts.find_by_id(account.account_id).await.unwrap().unwrap();
    assert!(password::verify("N3w!Passw0rd456".to_string(), stored.account_password)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_classification_listing() {
    let app = TestApp::new().await;
    let response = app.get("/inv/type/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("Sorry, no matching vehicles could be found."));

    let response = app.get("/inv/type/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/inv/detail/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Vehicle not found"));
}

#[tokio::test]
async fn test_get_inventory_json() {
    let app = TestApp::new().await;
    let staff = app.account("staff@example.com", STRONG_PASSWORD, "Employee").await;
    let cookie = app.session_cookie(&staff);

    let response = app.get("/inv/getInventory/1", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "[]");

    app.state
        .inventory
        .add_vehicle(&VehicleInput {
            classification_id: 1,
            make: "Batmobile".to_string(),
            model: "Custom".to_string(),
            year: 2007,
            description: "Ready for crime fighting".to_string(),
            image: "/images/vehicles/batmobile.jpg".to_string(),
            thumbnail: "/images/vehicles/batmobile-tn.jpg".to_string(),
            price: 65000.0,
            miles: 29887,
            color: "Black".to_string(),
        })
        .await
        .unwrap();

    let response = app.get("/inv/getInventory/1", Some(&cookie)).await;
    let vehicles: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(vehicles.as_array().unwrap().len(), 1);
    assert_eq!(vehicles[0]["inv_make"], "Batmobile");
}

#[tokio::test]
async fn test_staff_inventory_lifecycle() {
    let app = TestApp::new().await;
    let staff = app.account("staff@example.com", STRONG_PASSWORD, "Admin").await;
    let cookie = app.session_cookie(&staff);

    // Classification with a space is rejected and echoed
    let response = app
        .post("/inv/add-classification", "classification_name=Mini+Van", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Classification name must not contain spaces or special characters."));
    assert!(html.contains("value=\"Mini Van\""));

    let response = app
        .post("/inv/add-classification", "classification_name=Electric", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/inv/"));
    let electric = app
        .state
        .inventory
        .classifications()
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.classification_name == "Electric")
        .expect("classification added");

    let vehicle_body = |id: &str, year: &str| {
        format!(
            "{}classification_id={}&inv_make=Tesla&inv_model=Model+3&inv_year={}&inv_description=Quiet&inv_image=%2Fimages%2Fvehicles%2Fno-image.png&inv_thumbnail=%2Fimages%2Fvehicles%2Fno-image-tn.png&inv_price=39990&inv_miles=1200&inv_color=White",
            id, electric.classification_id, year
        )
    };

    let response = app
        .post("/inv/add-inventory", &vehicle_body("", "1850"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Please provide a valid year."));
    assert!(html.contains("value=\"Tesla\""));

    let response = app
        .post("/inv/add-inventory", &vehicle_body("", "2022"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let vehicles = app
        .state
        .inventory
        .vehicles_by_classification(electric.classification_id)
        .await
        .unwrap();
    assert_eq!(vehicles.len(), 1);
    let inv_id = vehicles[0].inv_id;

    let response = app.get(&format!("/inv/detail/{}", inv_id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("$39,990"));
    assert!(html.contains("1,200"));

    let response = app
        .post(
            "/inv/update",
            &vehicle_body(&format!("inv_id={}&", inv_id), "2023"),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let updated = app.state.inventory.vehicle(inv_id).await.unwrap().unwrap();
    assert_eq!(updated.inv_year, 2023);

    let response = app
        .get(&format!("/inv/delete/{}", inv_id), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post("/inv/delete", &format!("inv_id={}", inv_id), Some(&cookie))
        .await;
    assert_eq!(location(&response), Some("/inv/"));
    assert!(app.state.inventory.vehicle(inv_id).await.unwrap().is_none());

    let response = app
        .post("/inv/delete", &format!("inv_id={}", inv_id), Some(&cookie))
        .await;
    assert_eq!(location(&response), Some(format!("/inv/delete/{}", inv_id).as_str()));
}

#[tokio::test]
async fn test_unknown_route_renders_not_found_page() {
    let app = TestApp::new().await;
    let response = app.get("/no/such/page", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response)
        .await
        .contains("Sorry, we appear to have lost that page."));
}

#[tokio::test]
async fn test_trigger_error_renders_crash_page() {
    let app = TestApp::new().await;
    let response = app.get("/trigger-error", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(response).await;
    assert!(html.contains("Oh no! There was a crash. Maybe try a different route?"));
    assert!(!html.contains("intentional"));
}

#[tokio::test]
async fn test_register_rejects_password_without_symbol_in_any_script() {
    let app = TestApp::new().await;
    // "Ääääääää1234": upper, lower and digits, no special character
    let password = format!("%C3%84{}1234", "%C3%A4".repeat(7));
    let body = format!(
        "account_firstname=Jane&account_lastname=Doe&account_email=umlaut%40example.com&account_password={}",
        password
    );
    let response = app.post("/account/register", &body, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("Password does not meet requirements."));
    assert!(app
        .state
        .accounts
        .find_by_email("umlaut@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_password_update_rejects_password_without_symbol_in_any_script() {
    let app = TestApp::new().await;
    let account = app.account("me@example.com", STRONG_PASSWORD, "Client").await;
    let cookie = app.session_cookie(&account);

    let body = format!(
        "account_id={}&account_password=%C3%84{}1234",
        account.account_id,
        "%C3%A4".repeat(7)
    );
    let response = app.post("/account/update-password", &body, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("Password must contain at least one special character."));
}

#[tokio::test]
async fn test_logout_without_session_still_clears_cookie() {
    let app = TestApp::new().await;
    let response = app.get("/account/logout", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cleared = set_cookie(&response, "jwt").expect("jwt removal");
    assert!(cleared.starts_with("jwt=;"));
    assert!(is_removal(&cleared));
}

#[tokio::test]
async fn test_malformed_account_id_renders_bad_request_page() {
    let app = TestApp::new().await;
    let account = app.account("me@example.com", STRONG_PASSWORD, "Client").await;
    let cookie = app.session_cookie(&account);

    let body = "account_id=abc&account_firstname=Me&account_lastname=Person&account_email=me%40example.com";
    let response = app.post("/account/update", body, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains(super::BAD_REQUEST_MESSAGE));
    assert!(!html.contains("invalid digit"));
    assert!(!html.contains("deserialize"));
}

#[tokio::test]
async fn test_delete_without_inv_id_renders_bad_request_page() {
    let app = TestApp::new().await;
    let staff = app.account("staff@example.com", STRONG_PASSWORD, "Employee").await;
    let cookie = app.session_cookie(&staff);

    let response = app.post("/inv/delete", "", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains(super::BAD_REQUEST_MESSAGE));
    assert!(!html.contains("missing field"));
}

#[tokio::test]
async fn test_non_numeric_path_id_renders_not_found_page() {
    let app = TestApp::new().await;
    for uri in ["/inv/detail/abc", "/inv/type/abc"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        let html = body_text(response).await;
        assert!(html.contains(super::NOT_FOUND_MESSAGE), "{}", uri);
        assert!(!html.contains("Cannot parse"), "{}", uri);
    }
}

#[tokio::test]
async fn test_invalid_token_on_post_redirects_before_reading_body() {
    let app = TestApp::new().await;
    for uri in ["/account/update", "/inv/delete", "/account/login"] {
        let response = app.post(uri, "account_id=abc", Some("jwt=forged.token.value")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location(&response), Some("/account/login"), "{}", uri);
        assert!(is_removal(&set_cookie(&response, "jwt").expect("jwt removal")));
        assert!(set_cookie(&response, "flash").is_some(), "{}", uri);
    }
}
