use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Extension, Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::models::{NewSignin, NewSignup};
use crate::services::{recommend, ProductCard};

use super::AppState;

pub const NO_RECOMMENDATIONS_MESSAGE: &str = "No recommendations found.";

// Form types
//
// Fields are optional so that missing values surface as `InvalidInput`
// rather than a generic extractor rejection.

#[derive(Debug, Default, Deserialize)]
pub struct SignupForm {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SigninForm {
    #[serde(rename = "signinUsername")]
    pub username: Option<String>,
    #[serde(rename = "signinPassword")]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationForm {
    pub prod: Option<String>,
    pub nbr: Option<String>,
}

/// Validated recommendation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationQuery {
    pub product_name: String,
    pub top_n: i64,
}

fn required(field: &str, value: Option<String>) -> AppResult<String> {
    value.ok_or_else(|| AppError::InvalidInput(format!("missing form field `{}`", field)))
}

impl TryFrom<SignupForm> for NewSignup {
    type Error = AppError;

    fn try_from(form: SignupForm) -> AppResult<Self> {
        Ok(Self {
            username: required("username", form.username)?,
            email: required("email", form.email)?,
            password: required("password", form.password)?,
        })
    }
}

impl TryFrom<SigninForm> for NewSignin {
    type Error = AppError;

    fn try_from(form: SigninForm) -> AppResult<Self> {
        Ok(Self {
            username: required("signinUsername", form.username)?,
            password: required("signinPassword", form.password)?,
        })
    }
}

impl TryFrom<RecommendationForm> for RecommendationQuery {
    type Error = AppError;

    fn try_from(form: RecommendationForm) -> AppResult<Self> {
        let product_name = required("prod", form.prod)?;
        let raw = required("nbr", form.nbr)?;
        let top_n = raw.trim().parse::<i64>().map_err(|_| {
            AppError::InvalidInput(format!("`nbr` must be an integer, got {:?}", raw))
        })?;

        Ok(Self {
            product_name,
            top_n,
        })
    }
}

// View models handed to the template layer

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub view: &'static str,
    pub trending_products: Vec<ProductCard>,
}

#[derive(Debug, Serialize)]
pub struct MainView {
    pub view: &'static str,
    pub content_based_rec: Option<Vec<ProductCard>>,
    pub message: Option<String>,
}

impl MainView {
    fn empty() -> Self {
        Self {
            view: "main",
            content_based_rec: None,
            message: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FormView {
    pub view: &'static str,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Fallback for paths outside the route table
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

fn home_view(state: &AppState) -> HomeView {
    let trending_products = state
        .trending
        .head(state.home_page_size)
        .iter()
        .map(|product| ProductCard::from_product(product, state.decorations.as_ref()))
        .collect();

    HomeView {
        view: "index",
        trending_products,
    }
}

/// Home page with the first trending products
pub async fn index(State(state): State<AppState>) -> Json<HomeView> {
    Json(home_view(&state))
}

/// Recommendation page before any query
pub async fn main_page() -> Json<MainView> {
    Json(MainView::empty())
}

pub async fn signup_form() -> Json<FormView> {
    Json(FormView { view: "signup" })
}

/// Records a signup submission, then renders the home page
pub async fn signup(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<SignupForm>,
) -> AppResult<Json<HomeView>> {
    let signup = NewSignup::try_from(form)?;
    let username = signup.username.clone();

    let record_id = state.accounts.create_signup(signup).await?;

    tracing::info!(
        request_id = %request_id,
        record_id,
        username = %username,
        "Signup recorded"
    );

    Ok(Json(home_view(&state)))
}

pub async fn signin_form() -> Json<FormView> {
    Json(FormView { view: "signin" })
}

/// Records a signin attempt, then renders the home page.
///
/// The attempt is stored as-is; credentials are not checked against signups.
pub async fn signin(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<SigninForm>,
) -> AppResult<Json<HomeView>> {
    let signin = NewSignin::try_from(form)?;
    let username = signin.username.clone();

    let record_id = state.accounts.create_signin(signin).await?;

    tracing::info!(
        request_id = %request_id,
        record_id,
        username = %username,
        "Signin attempt recorded"
    );

    Ok(Json(home_view(&state)))
}

/// Content-based recommendations for the submitted product name
pub async fn recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<RecommendationForm>,
) -> AppResult<Json<MainView>> {
    let query = RecommendationQuery::try_from(form)?;

    let recs = recommend(&state.catalog, &query.product_name, query.top_n);

    tracing::info!(
        request_id = %request_id,
        query = %query.product_name,
        top_n = query.top_n,
        result_count = recs.len(),
        "Processed recommendation request"
    );

    if recs.is_empty() {
        return Ok(Json(MainView {
            message: Some(NO_RECOMMENDATIONS_MESSAGE.to_string()),
            ..MainView::empty()
        }));
    }

    let cards = recs
        .iter()
        .map(|rec| ProductCard::from_recommendation(rec, state.decorations.as_ref()))
        .collect();

    Ok(Json(MainView {
        content_based_rec: Some(cards),
        ..MainView::empty()
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::eq;
    use uuid::Uuid;

    use super::*;
    use crate::db::{accounts::MockAccountStore, Catalog};
    use crate::models::Product;
    use crate::services::presentation::tests::FixedDecorations;

    fn product(name: &str, tags: &str) -> Product {
        Product {
            name: name.to_string(),
            tags: tags.to_string(),
            brand: "Acme".to_string(),
            rating: 4.0,
            review_count: 2,
            image_url: "p.png".to_string(),
        }
    }

    fn state_with(accounts: MockAccountStore) -> AppState {
        let catalog = Catalog::new(vec![
            product("Red Shoe", "red shoe casual"),
            product("Blue Shoe", "blue shoe casual"),
            product("Red Hat", "red hat formal"),
        ]);
        let trending = Catalog::new((0..10).map(|i| product(&format!("Trend {}", i), "")).collect());

        AppState::new(catalog, trending, Arc::new(accounts))
            .with_decorations(Arc::new(FixedDecorations))
    }

    fn request_id() -> Extension<RequestId> {
        Extension(RequestId(Uuid::new_v4()))
    }

    #[test]
    fn test_recommendation_form_parses_integer() {
        let query = RecommendationQuery::try_from(RecommendationForm {
            prod: Some("Red Shoe".to_string()),
            nbr: Some(" 5 ".to_string()),
        })
        .unwrap();

        assert_eq!(query.product_name, "Red Shoe");
        assert_eq!(query.top_n, 5);
    }

    #[test]
    fn test_recommendation_form_rejects_non_integer() {
        let result = RecommendationQuery::try_from(RecommendationForm {
            prod: Some("Red Shoe".to_string()),
            nbr: Some("five".to_string()),
        });

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_recommendation_form_requires_nbr() {
        let result = RecommendationQuery::try_from(RecommendationForm {
            prod: Some("Red Shoe".to_string()),
            nbr: None,
        });

        assert!(matches!(result, Err(AppError::InvalidInput(msg)) if msg.contains("nbr")));
    }

    #[test]
    fn test_signin_form_requires_both_fields() {
        let result = NewSignin::try_from(SigninForm {
            username: Some("alice".to_string()),
            password: None,
        });

        assert!(matches!(result, Err(AppError::InvalidInput(msg)) if msg.contains("signinPassword")));
    }

    #[tokio::test]
    async fn test_not_found_names_the_path() {
        let error = not_found(Uri::from_static("/checkout")).await;
        assert!(matches!(error, AppError::NotFound(msg) if msg.contains("/checkout")));
    }

    #[tokio::test]
    async fn test_index_limits_to_home_page_size() {
        let state = state_with(MockAccountStore::new());

        let Json(view) = index(State(state)).await;

        assert_eq!(view.view, "index");
        assert_eq!(view.trending_products.len(), 8);
        assert_eq!(view.trending_products[0].name, "Trend 0");
        assert!(view.trending_products.iter().all(|card| card.price == 122));
    }

    #[tokio::test]
    async fn test_signup_writes_record_and_renders_home() {
        let mut accounts = MockAccountStore::new();
        accounts
            .expect_create_signup()
            .with(eq(NewSignup {
                username: "alice".to_string(),
                email: "a@x.com".to_string(),
                password: "p".to_string(),
            }))
            .times(1)
            .returning(|_| Ok(42));

        let form = SignupForm {
            username: Some("alice".to_string()),
            email: Some("a@x.com".to_string()),
            password: Some("p".to_string()),
        };

        let Json(view) = signup(State(state_with(accounts)), request_id(), Form(form))
            .await
            .unwrap();

        assert_eq!(view.view, "index");
    }

    #[tokio::test]
    async fn test_signup_storage_failure_is_surfaced() {
        let mut accounts = MockAccountStore::new();
        accounts
            .expect_create_signup()
            .times(1)
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let form = SignupForm {
            username: Some("alice".to_string()),
            email: Some("a@x.com".to_string()),
            password: Some("p".to_string()),
        };

        let result = signup(State(state_with(accounts)), request_id(), Form(form)).await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_signup_missing_field_does_not_touch_store() {
        let mut accounts = MockAccountStore::new();
        accounts.expect_create_signup().times(0);

        let form = SignupForm {
            username: Some("alice".to_string()),
            ..SignupForm::default()
        };

        let result = signup(State(state_with(accounts)), request_id(), Form(form)).await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_signin_records_attempt() {
        let mut accounts = MockAccountStore::new();
        accounts
            .expect_create_signin()
            .with(eq(NewSignin {
                username: "alice".to_string(),
                password: "wrong".to_string(),
            }))
            .times(1)
            .returning(|_| Ok(1));

        let form = SigninForm {
            username: Some("alice".to_string()),
            password: Some("wrong".to_string()),
        };

        let Json(view) = signin(State(state_with(accounts)), request_id(), Form(form))
            .await
            .unwrap();

        assert_eq!(view.view, "index");
    }

    #[tokio::test]
    async fn test_recommendations_returns_ranked_cards() {
        let form = RecommendationForm {
            prod: Some("red shoe".to_string()),
            nbr: Some("2".to_string()),
        };

        let Json(view) = recommendations(
            State(state_with(MockAccountStore::new())),
            request_id(),
            Form(form),
        )
        .await
        .unwrap();

        let cards = view.content_based_rec.unwrap();
        let names: Vec<&str> = cards.iter().map(|card| card.name.as_str()).collect();
        assert_eq!(names, vec!["Blue Shoe", "Red Hat"]);
        assert_eq!(view.message, None);
        assert!(cards.iter().all(|card| card.display_image == "static/img/img_3.png"));
    }

    #[tokio::test]
    async fn test_recommendations_no_match_sets_message() {
        let form = RecommendationForm {
            prod: Some("doesnotexist".to_string()),
            nbr: Some("5".to_string()),
        };

        let Json(view) = recommendations(
            State(state_with(MockAccountStore::new())),
            request_id(),
            Form(form),
        )
        .await
        .unwrap();

        assert_eq!(view.view, "main");
        assert!(view.content_based_rec.is_none());
        assert_eq!(view.message.as_deref(), Some(NO_RECOMMENDATIONS_MESSAGE));
    }
}
