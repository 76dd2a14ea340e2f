use crate::{database::MongoDB, models::User, utils::AppError};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::{doc, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

// JWT Claims. `sub` carries the user's email (the User Directory key); the
// client never supplies its identity directly - it always comes from here.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // email
    pub name: Option<String>,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
    pub jti: String, // JWT ID
    pub aud: String, // audience
    pub iss: String, // issuer
}

// Request/Response structures
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserInfo {
    pub email: String,
    pub name: Option<String>,
}

fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

fn get_jwt_issuer() -> String {
    std::env::var("JWT_ISSUER").unwrap_or_else(|_| "scheme-service".to_string())
}

fn get_jwt_audience() -> String {
    std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "scheme-api".to_string())
}

// Generate JWT token
pub fn generate_jwt(email: &str, name: Option<&str>) -> Result<String, AppError> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::hours(24)).timestamp() as usize;
    let jti = Uuid::new_v4().to_string();

    let claims = Claims {
        sub: email.to_string(),
        name: name.map(String::from),
        iat,
        exp,
        jti,
        aud: get_jwt_audience(),
        iss: get_jwt_issuer(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_jwt_secret().as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

// Verify JWT token
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[get_jwt_audience()]);

    let mut issuers = HashSet::new();
    issuers.insert(get_jwt_issuer());
    validation.iss = Some(issuers);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_jwt_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthenticated(format!("Invalid token: {}", e)))
}

// User login
pub async fn login(db: &MongoDB, request: &LoginRequest) -> Result<AuthResponse, AppError> {
    let collection = db.collection::<User>("users");

    let user = collection
        .find_one(doc! { "email": &request.email })
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::Unauthenticated("Invalid credentials".to_string()))?;

    let stored_password = user
        .password
        .clone()
        .ok_or_else(|| AppError::Unauthenticated("Invalid credentials".to_string()))?;

    // bcrypt is deliberately slow; keep it off the async workers
    let password = request.password.clone();
    let valid = tokio::task::spawn_blocking(move || verify(&password, &stored_password))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))?;

    if !valid {
        return Err(AppError::Unauthenticated("Invalid credentials".to_string()));
    }

    collection
        .update_one(
            doc! { "email": &user.email },
            doc! { "$set": { "lastLogin": BsonDateTime::now() } },
        )
        .await
        .map_err(AppError::database)?;

    let token = generate_jwt(&user.email, user.name.as_deref())?;

    Ok(AuthResponse {
        success: true,
        token,
        user: UserInfo {
            email: user.email,
            name: user.name,
        },
    })
}

// User registration
pub async fn register(db: &MongoDB, request: &RegisterRequest) -> Result<AuthResponse, AppError> {
    let collection = db.collection::<User>("users");

    if request.email.trim().is_empty() {
        return Err(AppError::MissingParameter("Email is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::MissingParameter(
            "Password is required".to_string(),
        ));
    }

    let existing = collection
        .find_one(doc! { "email": &request.email })
        .await
        .map_err(AppError::database)?;

    if existing.is_some() {
        return Err(AppError::InvalidRequest("User already exists".to_string()));
    }

    let password = request.password.clone();
    let hashed_password = tokio::task::spawn_blocking(move || hash(&password, DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

    let now = BsonDateTime::now();
    let new_user = User {
        _id: None,
        email: request.email.clone(),
        password: Some(hashed_password),
        name: request.name.clone(),
        phone_number: None,
        date_of_birth: None,
        gender: None,
        address: None,
        city: None,
        state: None,
        pincode: None,
        income_range: None,
        education_level: None,
        employment_status: None,
        occupation: None,
        family_size: None,
        category: None,
        disability: None,
        disability_details: None,
        saved_schemes: Vec::new(),
        created_at: Some(now),
        updated_at: Some(now),
        last_login: Some(now),
    };

    collection
        .insert_one(&new_user)
        .await
        .map_err(AppError::database)?;

    let token = generate_jwt(&new_user.email, new_user.name.as_deref())?;

    log::info!("✅ User registered successfully: {}", new_user.email);

    Ok(AuthResponse {
        success: true,
        token,
        user: UserInfo {
            email: new_user.email,
            name: new_user.name,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_token_round_trips() {
        let token = generate_jwt("a@x.com", Some("A")).unwrap();
        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.name.as_deref(), Some("A"));
        assert_eq!(claims.aud, get_jwt_audience());
        assert_eq!(claims.iss, get_jwt_issuer());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let iat = (Utc::now() - Duration::hours(48)).timestamp() as usize;
        let exp = (Utc::now() - Duration::hours(24)).timestamp() as usize;
        let claims = Claims {
            sub: "a@x.com".to_string(),
            name: None,
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
            aud: get_jwt_audience(),
            iss: get_jwt_issuer(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(get_jwt_secret().as_ref()),
        )
        .unwrap();

        let err = verify_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated(_)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            verify_token("not-a-jwt").unwrap_err(),
            AppError::Unauthenticated(_)
        ));
    }

    #[test]
    fn token_with_wrong_audience_is_rejected() {
        let iat = Utc::now().timestamp() as usize;
        let exp = (Utc::now() + Duration::hours(1)).timestamp() as usize;
        let claims = Claims {
            sub: "a@x.com".to_string(),
            name: None,
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
            aud: "someone-else".to_string(),
            iss: get_jwt_issuer(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(get_jwt_secret().as_ref()),
        )
        .unwrap();

        assert!(verify_token(&token).is_err());
    }
}
