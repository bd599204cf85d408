//! Authentication service.
//!
//! Sign-in is a pattern check on the email address; there are no passwords.
//! The signed-in user is kept under the `user` key and read back by anything
//! that needs a user id.

mod error;

pub use error::AuthError;

use tracing::{info, instrument, warn};

use shopfront_core::{Email, UserId, UserRole};

use crate::models::User;
use crate::services::cart::CartManager;
use crate::storage::{KeyValueStore, RecordError, keys, load_json, save_json};

/// Sign-in state over a key-value store.
#[derive(Debug, Clone)]
pub struct AuthSession<S> {
    store: S,
    admin_email: Email,
}

impl<S: KeyValueStore> AuthSession<S> {
    /// Create a session; `admin_email` is granted the admin role on sign-in.
    #[must_use]
    pub const fn new(store: S, admin_email: Email) -> Self {
        Self { store, admin_email }
    }

    /// Sign in as `email`, replacing any current user.
    ///
    /// The user id is derived from the address, so signing in again with the
    /// same email finds the same order history.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`] if `email` is not shaped like an
    /// address, or [`AuthError::Record`] if the user cannot be stored.
    #[instrument(skip(self))]
    pub fn login(&self, email: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        let role = if email.as_str().eq_ignore_ascii_case(self.admin_email.as_str()) {
            UserRole::Admin
        } else {
            UserRole::User
        };
        let user = User {
            id: UserId::derived_from(&email.as_str().to_lowercase()),
            name: email.local_part().to_string(),
            email,
            role,
        };
        save_json(&self.store, keys::USER, &user)?;
        info!(user_id = %user.id, %role, "Signed in");
        Ok(user)
    }

    /// The signed-in user, if any.
    ///
    /// A stored user that cannot be decoded is treated as signed out.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Record`] if the store cannot be read.
    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        match load_json(&self.store, keys::USER) {
            Ok(user) => Ok(user),
            Err(RecordError::Decode { source, .. }) => {
                warn!(error = %source, "Ignoring unreadable stored user");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The signed-in user, or [`AuthError::NotSignedIn`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotSignedIn`] when nobody is signed in.
    pub fn require_user(&self) -> Result<User, AuthError> {
        self.current_user()?.ok_or(AuthError::NotSignedIn)
    }

    /// The signed-in user if they are an admin.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotSignedIn`] or [`AuthError::Forbidden`].
    pub fn require_admin(&self) -> Result<User, AuthError> {
        let user = self.require_user()?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(AuthError::Forbidden)
        }
    }

    /// Sign out: forget the user and empty the cart. Orders are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the user key or the cart cannot be written.
    #[instrument(skip(self, cart))]
    pub fn logout<C: KeyValueStore>(&self, cart: &mut CartManager<C>) -> Result<(), AuthError> {
        self.store.remove(keys::USER).map_err(RecordError::from)?;
        cart.clear_cart()?;
        info!("Signed out");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::{Price, ProductId};

    use super::*;
    use crate::models::Product;
    use crate::storage::MemoryStore;

    fn session(store: &MemoryStore) -> AuthSession<MemoryStore> {
        AuthSession::new(store.clone(), Email::parse("admin@gmail.com").unwrap())
    }

    #[test]
    fn test_login_stores_user() {
        let store = MemoryStore::new();
        let auth = session(&store);
        let user = auth.login("shopper@gmail.com").unwrap();

        assert_eq!(user.name, "shopper");
        assert_eq!(user.role, UserRole::User);
        assert_eq!(auth.current_user().unwrap(), Some(user));
    }

    #[test]
    fn test_login_is_stable_per_email() {
        let store = MemoryStore::new();
        let auth = session(&store);
        let first = auth.login("shopper@gmail.com").unwrap();
        let again = auth.login("shopper@GMAIL.com").unwrap();
        assert_eq!(first.id, again.id);
    }

    #[test]
    fn test_admin_email_gets_admin_role() {
        let store = MemoryStore::new();
        let auth = session(&store);
        auth.login("admin@gmail.com").unwrap();
        assert!(auth.require_admin().is_ok());
    }

    #[test]
    fn test_require_admin_rejects_shopper() {
        let store = MemoryStore::new();
        let auth = session(&store);
        assert!(matches!(auth.require_admin(), Err(AuthError::NotSignedIn)));
        auth.login("shopper@gmail.com").unwrap();
        assert!(matches!(auth.require_admin(), Err(AuthError::Forbidden)));
    }

    #[test]
    fn test_login_rejects_bad_email() {
        let store = MemoryStore::new();
        let auth = session(&store);
        assert!(matches!(
            auth.login("not-an-email"),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(auth.current_user().unwrap().is_none());
    }

    #[test]
    fn test_logout_clears_user_and_cart_but_keeps_orders() {
        let store = MemoryStore::new();
        let auth = session(&store);
        auth.login("shopper@gmail.com").unwrap();
        store.set(keys::ORDERS, "[]").unwrap();

        let mut cart = CartManager::load(store.clone()).unwrap();
        let product = Product {
            id: ProductId::new("1"),
            name: "Thing".to_string(),
            description: String::new(),
            price: Price::from_cents(100),
            images: Vec::new(),
            category: "Misc".to_string(),
            stock: 1,
        };
        cart.add_to_cart(&product, 1).unwrap();

        auth.logout(&mut cart).unwrap();
        assert!(auth.current_user().unwrap().is_none());
        assert_eq!(cart.item_count(), 0);
        assert!(store.get(keys::ORDERS).unwrap().is_some());
    }

    #[test]
    fn test_unreadable_user_is_signed_out() {
        let store = MemoryStore::new();
        store.set(keys::USER, "{\"id\": 5}").unwrap();
        assert!(session(&store).current_user().unwrap().is_none());
    }
}
