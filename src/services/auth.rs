// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::{
        activity::ActivityAction,
        auth::{Claims, RegisterUserPayload, User},
    },
    services::activity_service::ActivityService,
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    activity: ActivityService,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, activity: ActivityService, jwt_secret: String) -> Self {
        Self { user_repo, activity, jwt_secret }
    }

    /// Cadastro de operador (rota restrita a ADMIN; o handler faz a checagem).
    pub async fn register_user(
        &self,
        actor: &User,
        payload: &RegisterUserPayload,
    ) -> Result<User, AppError> {
        // Hashing fora do banco e fora do executor async (é CPU-bound).
        let password_clone = payload.password.clone();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let new_user = self
            .user_repo
            .create_user(
                &payload.username,
                &payload.email,
                &hashed_password,
                &payload.name,
                payload.role,
            )
            .await?;

        self.activity
            .log(
                actor,
                ActivityAction::Create,
                "auth",
                &format!("Cadastrou o usuário '{}'", new_user.username),
            )
            .await;

        Ok(new_user)
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AppError::AccountDisabled);
        }

        let token = self.create_token(&user)?;

        self.activity
            .log(&user, ActivityAction::Login, "auth", "Entrou no sistema")
            .await;

        Ok(token)
    }

    pub async fn logout_user(&self, user: &User) {
        // O token é stateless; o logout existe só para a trilha de auditoria.
        self.activity
            .log(user, ActivityAction::Logout, "auth", "Saiu do sistema")
            .await;
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        // Conta desativada perde o acesso mesmo com token ainda válido.
        if !user.is_active {
            return Err(AppError::AccountDisabled);
        }

        Ok(user)
    }

    fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
