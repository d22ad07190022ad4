//! CreateSubscriptionHandler - Command handler for registering a savings plan.
//!
//! Finds or creates the user, creates a pending plan starting today and its
//! pending initial contribution under a fresh order id. The plan becomes
//! active only when the gateway confirms that order.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::foundation::{OrderId, PlanId, Timestamp, TransactionId, UserId};
use crate::domain::ledger::Transaction;
use crate::domain::savings::{
    PlanTerms, PlanTier, SavingsError, SavingsPlan, DEFAULT_MONTHS_DURATION,
};
use crate::domain::user::{Email, User};
use crate::ports::{LedgerRepository, SaveResult, SavingsPlanRepository, UserRepository};

/// Command to register a savings subscription.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub user_email: String,
    pub user_name: Option<String>,
    pub plan_type: String,
    pub amount: Decimal,
    pub monthly_yield: Decimal,
    pub months_duration: Option<u32>,
}

/// Identifiers of everything the registration created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSubscriptionResult {
    pub user_id: UserId,
    pub plan_id: PlanId,
    pub transaction_id: TransactionId,
    pub order_id: OrderId,
}

pub struct CreateSubscriptionHandler {
    users: Arc<dyn UserRepository>,
    plans: Arc<dyn SavingsPlanRepository>,
    ledger: Arc<dyn LedgerRepository>,
}

impl CreateSubscriptionHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        plans: Arc<dyn SavingsPlanRepository>,
        ledger: Arc<dyn LedgerRepository>,
    ) -> Self {
        Self {
            users,
            plans,
            ledger,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSubscriptionCommand,
    ) -> Result<CreateSubscriptionResult, SavingsError> {
        // 1. Validate everything before touching storage
        let email = Email::new(&cmd.user_email)?;
        let tier: PlanTier = cmd.plan_type.parse()?;
        let terms = PlanTerms::new(
            cmd.amount,
            cmd.monthly_yield,
            cmd.months_duration.unwrap_or(DEFAULT_MONTHS_DURATION),
        )?;

        // 2. Find or create the saver
        let user = self
            .users
            .find_or_create(User::register(UserId::new(), email, cmd.user_name))
            .await?;

        // 3. Pending plan starting today
        let now = Timestamp::now();
        let plan = SavingsPlan::create(PlanId::new(), user.id, tier, terms, now.date());
        self.plans.save(&plan).await?;

        // 4. Pending initial contribution
        let order_id = OrderId::for_plan(&plan.id, now.as_unix_millis());
        let transaction = Transaction::initial_contribution(
            TransactionId::new(),
            plan.id,
            terms.amount(),
            order_id.clone(),
        );
        if self.ledger.save(&transaction).await? == SaveResult::AlreadyExists {
            return Err(SavingsError::infrastructure(format!(
                "order id {} already registered",
                order_id
            )));
        }

        tracing::info!(
            user_id = %user.id,
            plan_id = %plan.id,
            order_id = %order_id,
            plan_type = %tier,
            amount = %terms.amount(),
            "Subscription registered"
        );

        Ok(CreateSubscriptionResult {
            user_id: user.id,
            plan_id: plan.id,
            transaction_id: transaction.id,
            order_id,
        })
    }
}
