//! In-Memory Store Adapter
//!
//! Implements the user, plan and ledger ports over one shared state guarded by
//! a single `RwLock`. Confirmation, plan activation and the wallet write happen
//! under one write guard, so they are observed together or not at all.
//! Useful for tests and local development.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, OrderId, PlanId, TransactionId, UserId,
};
use crate::domain::ledger::Transaction;
use crate::domain::savings::{PlanStatus, SavingsPlan};
use crate::domain::user::{Email, User};
use crate::ports::{
    ConfirmOutcome, ConfirmPayment, LedgerRepository, SaveResult, SavingsPlanRepository,
    UserRepository,
};

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    emails: HashMap<Email, UserId>,
    plans: HashMap<PlanId, SavingsPlan>,
    transactions: HashMap<TransactionId, Transaction>,
    orders: HashMap<OrderId, TransactionId>,
}

/// Shared in-memory state. Hand out per-port views with
/// [`users`](Self::users), [`plans`](Self::plans) and [`ledger`](Self::ledger).
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            store: self.clone(),
        }
    }

    pub fn plans(&self) -> InMemorySavingsPlanRepository {
        InMemorySavingsPlanRepository {
            store: self.clone(),
        }
    }

    pub fn ledger(&self) -> InMemoryLedgerRepository {
        InMemoryLedgerRepository {
            store: self.clone(),
        }
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Number of stored plans
    pub async fn plan_count(&self) -> usize {
        self.state.read().await.plans.len()
    }

    /// Number of stored transactions
    pub async fn transaction_count(&self) -> usize {
        self.state.read().await.transactions.len()
    }
}

/// [`UserRepository`] view of an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_or_create(&self, candidate: User) -> Result<User, DomainError> {
        let mut state = self.store.state.write().await;
        if let Some(existing) = state
            .emails
            .get(&candidate.email)
            .and_then(|id| state.users.get(id))
        {
            return Ok(existing.clone());
        }
        state.emails.insert(candidate.email.clone(), candidate.id);
        state.users.insert(candidate.id, candidate.clone());
        Ok(candidate)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let state = self.store.state.read().await;
        Ok(state
            .emails
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.store.state.read().await.users.get(id).cloned())
    }
}

/// [`SavingsPlanRepository`] view of an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemorySavingsPlanRepository {
    store: InMemoryStore,
}

#[async_trait]
impl SavingsPlanRepository for InMemorySavingsPlanRepository {
    async fn save(&self, plan: &SavingsPlan) -> Result<(), DomainError> {
        let mut state = self.store.state.write().await;
        if !state.users.contains_key(&plan.user_id) {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found")
                .with_detail("user_id", plan.user_id.to_string()));
        }
        state.plans.insert(plan.id, plan.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PlanId) -> Result<Option<SavingsPlan>, DomainError> {
        Ok(self.store.state.read().await.plans.get(id).cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<SavingsPlan>, DomainError> {
        let state = self.store.state.read().await;
        let mut plans: Vec<SavingsPlan> = state
            .plans
            .values()
            .filter(|p| &p.user_id == user_id)
            .cloned()
            .collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(plans)
    }
}

/// [`LedgerRepository`] view of an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryLedgerRepository {
    store: InMemoryStore,
}

#[async_trait]
impl LedgerRepository for InMemoryLedgerRepository {
    async fn save(&self, transaction: &Transaction) -> Result<SaveResult, DomainError> {
        let mut state = self.store.state.write().await;
        if state.orders.contains_key(&transaction.order_id) {
            return Ok(SaveResult::AlreadyExists);
        }
        if let Some(plan_id) = &transaction.plan_id {
            if !state.plans.contains_key(plan_id) {
                return Err(DomainError::new(ErrorCode::PlanNotFound, "Plan not found")
                    .with_detail("plan_id", plan_id.to_string()));
            }
        }
        state
            .orders
            .insert(transaction.order_id.clone(), transaction.id);
        state
            .transactions
            .insert(transaction.id, transaction.clone());
        Ok(SaveResult::Inserted)
    }

    async fn find_by_order_id(
        &self,
        order_id: &OrderId,
    ) -> Result<Option<Transaction>, DomainError> {
        let state = self.store.state.read().await;
        Ok(state
            .orders
            .get(order_id)
            .and_then(|id| state.transactions.get(id))
            .cloned())
    }

    async fn confirm_payment(
        &self,
        request: ConfirmPayment,
    ) -> Result<ConfirmOutcome, DomainError> {
        let mut state = self.store.state.write().await;

        let Some(mut transaction) = state
            .orders
            .get(&request.order_id)
            .and_then(|id| state.transactions.get(id))
            .cloned()
        else {
            return Ok(ConfirmOutcome::NotFound);
        };

        if transaction.is_confirmed() {
            return Ok(ConfirmOutcome::AlreadyConfirmed {
                transaction_id: transaction.id,
            });
        }

        // Stage every change on copies, then commit them together.
        transaction.confirm(request.details, request.paid_at)?;

        let mut plan = transaction
            .plan_id
            .and_then(|id| state.plans.get(&id))
            .cloned();
        let mut plan_activated = false;
        if let Some(plan) = plan.as_mut() {
            if plan.status == PlanStatus::Pending {
                plan.activate()?;
                plan_activated = true;
            }
        }

        let mut owner = plan
            .as_ref()
            .and_then(|p| state.users.get(&p.user_id))
            .cloned();
        let wallet_recorded = match (owner.as_mut(), request.payer_wallet) {
            (Some(user), Some(wallet)) => user.record_wallet(wallet),
            _ => false,
        };

        let transaction_id = transaction.id;
        state.transactions.insert(transaction_id, transaction);
        if let Some(plan) = plan {
            state.plans.insert(plan.id, plan);
        }
        if let Some(user) = owner {
            state.users.insert(user.id, user);
        }

        Ok(ConfirmOutcome::Confirmed {
            transaction_id,
            plan_activated,
            wallet_recorded,
        })
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Transaction>, DomainError> {
        let state = self.store.state.read().await;
        let plan_ids: HashSet<PlanId> = state
            .plans
            .values()
            .filter(|p| &p.user_id == user_id)
            .map(|p| p.id)
            .collect();
        let mut transactions: Vec<Transaction> = state
            .transactions
            .values()
            .filter(|t| t.plan_id.map_or(false, |id| plan_ids.contains(&id)))
            .cloned()
            .collect();
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(transactions)
    }
}
