//! User service
//!
//! Account lookup, registration and the garage view. Authentication and
//! token issuance live outside this crate; callers hand in an already
//! authenticated user id.

use std::sync::Arc;

use tracing::info;

use types::card::Card;
use types::ids::UserId;
use types::user::User;
use types::vehicle::Vehicle;

use crate::error::ServiceError;
use crate::repository::{CardRepository, UserRepository, VehicleRepository};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    cards: Arc<dyn CardRepository>,
    vehicles: Arc<dyn VehicleRepository>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        cards: Arc<dyn CardRepository>,
        vehicles: Arc<dyn VehicleRepository>,
    ) -> Self {
        Self {
            users,
            cards,
            vehicles,
        }
    }

    pub async fn get(&self, user_id: UserId) -> Result<User, ServiceError> {
        self.users
            .get(user_id)
            .await
            .ok_or_else(|| ServiceError::not_found("user", user_id))
    }

    /// Create a new account from an already hashed password
    pub async fn register(
        &self,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> User {
        let user = User::new(username, password_hash);
        self.users.insert(user.clone()).await;
        info!(user_id = %user.id, "user registered");
        user
    }

    /// Grant in-game currency (e.g. starting balance, promotions)
    pub async fn grant_currency(&self, user_id: UserId, amount: i64) -> Result<User, ServiceError> {
        let mut user = self.get(user_id).await?;
        user.add_currency(amount)?;
        self.users.update(user.clone()).await;
        Ok(user)
    }

    /// The user's garage: every owned card joined with its vehicle
    pub async fn garage(&self, user_id: UserId) -> Result<Vec<(Card, Vehicle)>, ServiceError> {
        let cards = self.cards.by_owner(user_id).await;
        let mut garage = Vec::with_capacity(cards.len());
        for card in cards {
            let vehicle = self
                .vehicles
                .get(card.vehicle_id)
                .await
                .ok_or_else(|| ServiceError::not_found("vehicle", card.vehicle_id))?;
            garage.push((card, vehicle));
        }
        Ok(garage)
    }
}
