use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use hourglass_rs::SafeTimeProvider;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::eligibility::{Assessment, EligibilityDecision, EligibilityEngine};
use crate::errors::{LendingError, Result};
use crate::events::{EventStore, LendingEvent};
use crate::registration::{approved_limit_for, RegistrationRequest};
use crate::requests::LoanApplication;
use crate::state::{projected_end_date, CustomerRecord, LoanRecord};
use crate::types::{CustomerId, LoanHistoryEntry, LoanId};

/// eligibility check result for a stored customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityQuote {
    pub customer_id: CustomerId,
    pub assessment: Assessment,
}

/// loan creation result; `loan_id` is set only when approved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanCreation {
    pub loan_id: Option<LoanId>,
    pub customer_id: CustomerId,
    pub decision: EligibilityDecision,
}

/// outcome of a bulk import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub customers_created: usize,
    pub customers_updated: usize,
    pub loans_created: usize,
    pub loans_skipped: usize,
    pub errors: Vec<String>,
}

/// in-memory store of customers and loans driving the eligibility engine
///
/// All mutation goes through `&mut self`, so allocating a loan id and raising
/// the customer's debt happen as one step. Identifiers come from monotonic
/// counters that imports push past the largest id seen.
#[derive(Debug)]
pub struct LoanBook {
    engine: EligibilityEngine,
    customers: BTreeMap<CustomerId, CustomerRecord>,
    loans: BTreeMap<LoanId, LoanRecord>,
    next_customer_id: u64,
    next_loan_id: u64,
    pub events: EventStore,
}

impl LoanBook {
    pub fn new(engine: EligibilityEngine) -> Self {
        Self {
            engine,
            customers: BTreeMap::new(),
            loans: BTreeMap::new(),
            next_customer_id: 1,
            next_loan_id: 1,
            events: EventStore::new(),
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// register a new customer with a limit derived from income
    pub fn register_customer(
        &mut self,
        request: RegistrationRequest,
        time_provider: &SafeTimeProvider,
    ) -> Result<CustomerRecord> {
        let policy = &self.engine.config().registration;
        request.validate(policy)?;
        let approved_limit = approved_limit_for(request.monthly_income, policy)?;

        let customer_id = CustomerId(self.next_customer_id);
        self.next_customer_id += 1;

        let record = CustomerRecord {
            customer_id,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            age: request.age,
            phone_number: request.phone_number.trim().to_string(),
            monthly_salary: request.monthly_income,
            approved_limit,
            current_debt: Money::ZERO,
        };

        info!("registered customer {} with approved limit {}", customer_id, approved_limit);
        self.events.emit(LendingEvent::CustomerRegistered {
            customer_id,
            approved_limit,
            timestamp: time_provider.now(),
        });

        self.customers.insert(customer_id, record.clone());
        Ok(record)
    }

    /// add an existing customer, e.g. from an external ingestion job
    pub fn import_customer(&mut self, record: CustomerRecord) -> Result<()> {
        let id = record.customer_id;
        match self.customers.entry(id) {
            Entry::Occupied(_) => Err(LendingError::DuplicateCustomer { id }),
            Entry::Vacant(slot) => {
                slot.insert(record);
                self.next_customer_id = self.next_customer_id.max(id.0 + 1);
                Ok(())
            }
        }
    }

    /// add an existing loan; its customer must already be known
    ///
    /// The customer's current debt is left untouched: imported customers carry
    /// their own debt figure.
    pub fn import_loan(&mut self, record: LoanRecord) -> Result<()> {
        if !self.customers.contains_key(&record.customer_id) {
            return Err(LendingError::CustomerNotFound {
                id: record.customer_id,
            });
        }

        let id = record.loan_id;
        match self.loans.entry(id) {
            Entry::Occupied(_) => Err(LendingError::DuplicateLoan { id }),
            Entry::Vacant(slot) => {
                slot.insert(record);
                self.next_loan_id = self.next_loan_id.max(id.0 + 1);
                Ok(())
            }
        }
    }

    /// bulk import: customers are upserted, known loans skipped, row errors collected
    pub fn import(&mut self, customers: Vec<CustomerRecord>, loans: Vec<LoanRecord>) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for record in customers {
            let id = record.customer_id;
            if self.customers.contains_key(&id) {
                self.customers.insert(id, record);
                summary.customers_updated += 1;
            } else if self.import_customer(record).is_ok() {
                summary.customers_created += 1;
            }
        }

        for (row, record) in loans.into_iter().enumerate() {
            let loan_id = record.loan_id;
            match self.import_loan(record) {
                Ok(()) => summary.loans_created += 1,
                Err(LendingError::DuplicateLoan { .. }) => summary.loans_skipped += 1,
                Err(err) => {
                    warn!("loan row {} ({}) not imported: {}", row, loan_id, err);
                    summary.errors.push(format!("loan row {}: {}", row, err));
                }
            }
        }

        info!(
            "import finished: {} customers created, {} updated, {} loans created, {} errors",
            summary.customers_created,
            summary.customers_updated,
            summary.loans_created,
            summary.errors.len()
        );
        summary
    }

    pub fn customer(&self, id: CustomerId) -> Result<&CustomerRecord> {
        self.customers
            .get(&id)
            .ok_or(LendingError::CustomerNotFound { id })
    }

    pub fn loan(&self, id: LoanId) -> Result<&LoanRecord> {
        self.loans.get(&id).ok_or(LendingError::LoanNotFound { id })
    }

    /// all loans of a customer, ordered by loan id
    pub fn customer_loans(&self, id: CustomerId) -> Result<Vec<&LoanRecord>> {
        self.customer(id)?;
        Ok(self
            .loans
            .values()
            .filter(|loan| loan.customer_id == id)
            .collect())
    }

    /// scoring view of a customer's loans
    pub fn history_for(&self, id: CustomerId) -> Vec<LoanHistoryEntry> {
        self.loans
            .values()
            .filter(|loan| loan.customer_id == id)
            .map(LoanRecord::history_entry)
            .collect()
    }

    /// score the customer and decide, without creating a loan
    pub fn check_eligibility(
        &mut self,
        application: &LoanApplication,
        time_provider: &SafeTimeProvider,
    ) -> Result<EligibilityQuote> {
        let assessment = self.assess(application, time_provider)?;
        Ok(EligibilityQuote {
            customer_id: application.customer_id,
            assessment,
        })
    }

    /// score, decide and, on approval, book the loan and raise the customer's debt
    pub fn create_loan(
        &mut self,
        application: &LoanApplication,
        time_provider: &SafeTimeProvider,
    ) -> Result<LoanCreation> {
        let decision = self.assess(application, time_provider)?.decision;
        let customer_id = application.customer_id;
        let now = time_provider.now();

        if !decision.approved {
            info!(
                "loan declined for customer {} with score {}",
                customer_id, decision.score
            );
            self.events.emit(LendingEvent::LoanDeclined {
                customer_id,
                score: decision.score,
                amount: application.loan_amount,
                timestamp: now,
            });
            return Ok(LoanCreation {
                loan_id: None,
                customer_id,
                decision,
            });
        }

        let customer = self
            .customers
            .get_mut(&customer_id)
            .ok_or(LendingError::CustomerNotFound { id: customer_id })?;

        let loan_id = LoanId(self.next_loan_id);
        self.next_loan_id += 1;

        let start_date = now.date_naive();
        let record = LoanRecord {
            loan_id,
            customer_id,
            loan_amount: application.loan_amount,
            tenure: decision.tenure,
            interest_rate: decision.applied_rate,
            monthly_repayment: decision.monthly_installment,
            emis_paid_on_time: 0,
            start_date,
            end_date: projected_end_date(start_date, decision.tenure),
        };

        let old_debt = customer.current_debt;
        customer.current_debt += application.loan_amount;
        let new_debt = customer.current_debt;

        info!(
            "loan {} originated for customer {}: {} at {} over {} months, installment {}",
            loan_id,
            customer_id,
            record.loan_amount,
            record.interest_rate,
            record.tenure,
            record.monthly_repayment
        );
        self.events.emit(LendingEvent::LoanOriginated {
            loan_id,
            customer_id,
            amount: record.loan_amount,
            interest_rate: record.interest_rate,
            monthly_installment: record.monthly_repayment,
            start_date: record.start_date,
            end_date: record.end_date,
        });
        self.events.emit(LendingEvent::DebtIncreased {
            customer_id,
            old_debt,
            new_debt,
            timestamp: now,
        });

        self.loans.insert(loan_id, record);

        Ok(LoanCreation {
            loan_id: Some(loan_id),
            customer_id,
            decision,
        })
    }

    fn assess(
        &mut self,
        application: &LoanApplication,
        time_provider: &SafeTimeProvider,
    ) -> Result<Assessment> {
        let request = application.to_request(&self.engine.config().limits)?;
        let customer = self.customer(application.customer_id)?.snapshot();
        let history = self.history_for(application.customer_id);

        let assessment = self
            .engine
            .assess(&customer, &history, &request, time_provider)?;

        let decision = &assessment.decision;
        self.events.emit(LendingEvent::EligibilityAssessed {
            customer_id: application.customer_id,
            score: decision.score,
            band: decision.band,
            approved: decision.approved,
            requested_rate: decision.requested_rate,
            applied_rate: decision.applied_rate,
            timestamp: time_provider.now(),
        });

        Ok(assessment)
    }
}

impl Default for LoanBook {
    fn default() -> Self {
        Self::new(EligibilityEngine::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use chrono::{NaiveDate, TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
        ))
    }

    fn registration(income: i64) -> RegistrationRequest {
        RegistrationRequest {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            age: 30,
            monthly_income: Money::from_major(income),
            phone_number: "9999999999".to_string(),
        }
    }

    fn customer_record(id: u64, limit: i64, debt: i64) -> CustomerRecord {
        CustomerRecord {
            customer_id: CustomerId(id),
            first_name: "Imported".to_string(),
            last_name: "Customer".to_string(),
            age: 45,
            phone_number: "9000000000".to_string(),
            monthly_salary: Money::from_major(limit / 36),
            approved_limit: Money::from_major(limit),
            current_debt: Money::from_major(debt),
        }
    }

    fn loan_record(id: u64, customer: u64, tenure: u32, paid: u32, start: NaiveDate) -> LoanRecord {
        LoanRecord {
            loan_id: LoanId(id),
            customer_id: CustomerId(customer),
            loan_amount: Money::from_major(100_000),
            tenure,
            interest_rate: Rate::from_percentage(10),
            monthly_repayment: Money::from_decimal(dec!(8791.59)),
            emis_paid_on_time: paid,
            start_date: start,
            end_date: projected_end_date(start, tenure),
        }
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut book = LoanBook::default();
        let time = time();

        let first = book.register_customer(registration(50_000), &time).unwrap();
        let second = book.register_customer(registration(10_000), &time).unwrap();

        assert_eq!(first.customer_id, CustomerId(1));
        assert_eq!(second.customer_id, CustomerId(2));
        assert_eq!(first.approved_limit, Money::from_major(1_800_000));
        assert_eq!(second.approved_limit, Money::from_major(400_000));
        assert_eq!(first.current_debt, Money::ZERO);
        assert_eq!(book.events.events().len(), 2);
    }

    #[test]
    fn test_register_rejects_invalid_request() {
        let mut book = LoanBook::default();
        let mut request = registration(50_000);
        request.age = 12;
        assert!(book.register_customer(request, &time()).is_err());
        assert!(book.events.events().is_empty());
    }

    #[test]
    fn test_import_advances_counters() {
        let mut book = LoanBook::default();
        book.import_customer(customer_record(40, 1_000_000, 0)).unwrap();
        book.import_loan(loan_record(900, 40, 12, 12, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()))
            .unwrap();

        let registered = book.register_customer(registration(50_000), &time()).unwrap();
        assert_eq!(registered.customer_id, CustomerId(41));

        let application = LoanApplication::new(CustomerId(40), Money::from_major(50_000), dec!(14), 12);
        let creation = book.create_loan(&application, &time()).unwrap();
        assert_eq!(creation.loan_id, Some(LoanId(901)));
    }

    #[test]
    fn test_import_rejects_duplicates_and_orphans() {
        let mut book = LoanBook::default();
        book.import_customer(customer_record(1, 1_000_000, 0)).unwrap();
        assert_eq!(
            book.import_customer(customer_record(1, 1_000_000, 0)),
            Err(LendingError::DuplicateCustomer { id: CustomerId(1) })
        );

        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert_eq!(
            book.import_loan(loan_record(1, 2, 12, 0, start)),
            Err(LendingError::CustomerNotFound { id: CustomerId(2) })
        );
        book.import_loan(loan_record(1, 1, 12, 0, start)).unwrap();
        assert_eq!(
            book.import_loan(loan_record(1, 1, 12, 0, start)),
            Err(LendingError::DuplicateLoan { id: LoanId(1) })
        );
    }

    #[test]
    fn test_bulk_import_summary() {
        let mut book = LoanBook::default();
        book.import_customer(customer_record(1, 500_000, 0)).unwrap();

        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let summary = book.import(
            vec![customer_record(1, 900_000, 0), customer_record(2, 300_000, 0)],
            vec![
                loan_record(10, 1, 12, 12, start),
                loan_record(10, 1, 12, 12, start),
                loan_record(11, 99, 12, 12, start),
            ],
        );

        assert_eq!(summary.customers_created, 1);
        assert_eq!(summary.customers_updated, 1);
        assert_eq!(summary.loans_created, 1);
        assert_eq!(summary.loans_skipped, 1);
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(
            book.customer(CustomerId(1)).unwrap().approved_limit,
            Money::from_major(900_000)
        );
    }

    #[test]
    fn test_create_loan_books_and_raises_debt() {
        let mut book = LoanBook::default();
        let time = time();
        let customer = book.register_customer(registration(50_000), &time).unwrap();

        // new customer: utilization only, score 25, subprime
        let application = LoanApplication::new(customer.customer_id, Money::from_major(300_000), dec!(12), 24);
        let creation = book.create_loan(&application, &time).unwrap();

        assert_eq!(creation.loan_id, Some(LoanId(1)));
        assert!(creation.decision.rate_corrected());
        assert_eq!(creation.decision.monthly_installment, Money::from_decimal(dec!(14688.93)));

        let loan = book.loan(LoanId(1)).unwrap();
        assert_eq!(loan.interest_rate, Rate::from_percentage(16));
        assert_eq!(loan.monthly_repayment, Money::from_decimal(dec!(14688.93)));
        assert_eq!(loan.start_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(loan.end_date, NaiveDate::from_ymd_opt(2026, 5, 22).unwrap());
        assert_eq!(loan.repayments_left(), 24);

        let updated = book.customer(customer.customer_id).unwrap();
        assert_eq!(updated.current_debt, Money::from_major(300_000));
        assert_eq!(book.customer_loans(customer.customer_id).unwrap().len(), 1);
    }

    #[test]
    fn test_declined_loan_changes_nothing() {
        let mut book = LoanBook::default();
        book.import_customer(customer_record(7, 100_000, 150_000)).unwrap();

        let application = LoanApplication::new(CustomerId(7), Money::from_major(10_000), dec!(20), 12);
        let creation = book.create_loan(&application, &time()).unwrap();

        assert_eq!(creation.loan_id, None);
        assert!(!creation.decision.approved);
        assert_eq!(creation.decision.monthly_installment, Money::ZERO);
        assert_eq!(
            book.customer(CustomerId(7)).unwrap().current_debt,
            Money::from_major(150_000)
        );
        assert!(book.customer_loans(CustomerId(7)).unwrap().is_empty());
        assert!(matches!(
            book.events.events().last(),
            Some(LendingEvent::LoanDeclined { .. })
        ));
    }

    #[test]
    fn test_check_eligibility_does_not_book() {
        let mut book = LoanBook::default();
        book.import_customer(customer_record(3, 1_000_000, 0)).unwrap();

        let application = LoanApplication::new(CustomerId(3), Money::from_major(100_000), dec!(10), 12);
        let quote = book.check_eligibility(&application, &time()).unwrap();

        assert!(quote.assessment.decision.approved);
        assert!(book.customer_loans(CustomerId(3)).unwrap().is_empty());
        assert_eq!(book.customer(CustomerId(3)).unwrap().current_debt, Money::ZERO);
    }

    #[test]
    fn test_unknown_customer_and_loan() {
        let mut book = LoanBook::default();
        let application = LoanApplication::new(CustomerId(5), Money::from_major(1_000), dec!(10), 12);
        assert_eq!(
            book.check_eligibility(&application, &time()).unwrap_err(),
            LendingError::CustomerNotFound { id: CustomerId(5) }
        );
        assert!(matches!(
            book.loan(LoanId(5)),
            Err(LendingError::LoanNotFound { .. })
        ));
        assert!(book.customer_loans(CustomerId(5)).is_err());
    }

    #[test]
    fn test_invalid_application_is_rejected_before_scoring() {
        let mut book = LoanBook::default();
        book.import_customer(customer_record(1, 1_000_000, 0)).unwrap();
        let application = LoanApplication::new(CustomerId(1), Money::from_major(1_000), dec!(10), 121);
        assert!(matches!(
            book.create_loan(&application, &time()),
            Err(LendingError::InvalidRequest { field: "tenure", .. })
        ));
        assert!(book.events.events().is_empty());
    }
}
