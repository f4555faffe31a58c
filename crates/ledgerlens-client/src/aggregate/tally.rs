use crate::aggregate::normalize::{FraudStatus, Gender};
use crate::contracts::types::{FraudCounts, GenderCounts};

pub fn record_gender(counts: &mut GenderCounts, gender: Gender) {
    match gender {
        Gender::Male => counts.male += 1,
        Gender::Female => counts.female += 1,
    }
}

pub fn record_fraud(counts: &mut FraudCounts, status: FraudStatus) {
    match status {
        FraudStatus::NoFraud => counts.no_fraud += 1,
        FraudStatus::Fraud => counts.fraud += 1,
    }
}
