// ═══════════════════════════════════════════════════════════════════
// Ledger Tests — money invested and ownership-period replay
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use dividend_tax_core::errors::CoreError;
use dividend_tax_core::models::ownership::OwnershipPeriod;
use dividend_tax_core::models::settings::OversellPolicy;
use dividend_tax_core::models::transaction::Transaction;
use dividend_tax_core::services::ledger_service::LedgerService;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn svc() -> LedgerService {
    LedgerService::new(OversellPolicy::Reject)
}

// ═══════════════════════════════════════════════════════════════════
//  money_invested
// ═══════════════════════════════════════════════════════════════════

mod money_invested {
    use super::*;

    #[test]
    fn sums_buys_minus_sells_plus_all_commissions() {
        let transactions = vec![
            Transaction::buy("AAPL", d(2023, 1, 1), dec!(10), dec!(150), dec!(5)),
            Transaction::sell("AAPL", d(2023, 2, 1), dec!(5), dec!(160), dec!(3)),
            Transaction::buy("AAPL", d(2023, 3, 1), dec!(8), dec!(140), dec!(4)),
        ];

        // 1500 − 800 + 1120 + 12 = 1832
        assert_eq!(svc().money_invested(&transactions), dec!(1832));
    }

    #[test]
    fn sell_commission_is_added_not_subtracted() {
        let transactions = vec![
            Transaction::buy("KO", d(2023, 1, 1), dec!(10), dec!(50), dec!(0)),
            Transaction::sell("KO", d(2023, 2, 1), dec!(10), dec!(50), dec!(7)),
        ];

        assert_eq!(svc().money_invested(&transactions), dec!(7));
    }

    #[test]
    fn empty_ledger_is_zero() {
        assert_eq!(svc().money_invested(&[]), dec!(0));
    }

    #[test]
    fn fractional_shares() {
        let transactions = vec![Transaction::buy(
            "VOO",
            d(2023, 1, 1),
            dec!(0.25),
            dec!(400.40),
            dec!(1.99),
        )];

        assert_eq!(svc().money_invested(&transactions), dec!(102.09));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ownership_periods
// ═══════════════════════════════════════════════════════════════════

mod ownership_periods {
    use super::*;

    #[test]
    fn buy_sell_buy_produces_three_periods() {
        let transactions = vec![
            Transaction::buy("V", d(2023, 1, 1), dec!(10), dec!(100), dec!(5)),
            Transaction::sell("V", d(2023, 2, 1), dec!(5), dec!(120), dec!(3)),
            Transaction::buy("V", d(2023, 3, 1), dec!(5), dec!(110), dec!(2)),
        ];

        let periods = svc().ownership_periods(&transactions).unwrap();

        assert_eq!(
            periods,
            vec![
                OwnershipPeriod::new(d(2023, 1, 1), Some(d(2023, 2, 1)), dec!(10)),
                OwnershipPeriod::new(d(2023, 2, 1), Some(d(2023, 3, 1)), dec!(5)),
                OwnershipPeriod::new(d(2023, 3, 1), None, dec!(10)),
            ]
        );
    }

    #[test]
    fn sell_closes_period_with_pre_sale_quantity() {
        let transactions = vec![
            Transaction::buy("V", d(2023, 1, 1), dec!(10), dec!(100), dec!(0)),
            Transaction::sell("V", d(2023, 2, 1), dec!(4), dec!(120), dec!(0)),
        ];

        let periods = svc().ownership_periods(&transactions).unwrap();

        assert_eq!(periods[0].quantity, dec!(10));
        assert_eq!(periods[1], OwnershipPeriod::new(d(2023, 2, 1), None, dec!(6)));
    }

    #[test]
    fn selling_everything_leaves_no_open_period() {
        let transactions = vec![
            Transaction::buy("V", d(2023, 1, 1), dec!(10), dec!(100), dec!(0)),
            Transaction::sell("V", d(2023, 2, 1), dec!(10), dec!(120), dec!(0)),
        ];

        let periods = svc().ownership_periods(&transactions).unwrap();

        assert_eq!(
            periods,
            vec![OwnershipPeriod::new(d(2023, 1, 1), Some(d(2023, 2, 1)), dec!(10))]
        );
    }

    #[test]
    fn rebuy_after_flat_opens_fresh_period() {
        let transactions = vec![
            Transaction::buy("V", d(2023, 1, 1), dec!(10), dec!(100), dec!(0)),
            Transaction::sell("V", d(2023, 2, 1), dec!(10), dec!(120), dec!(0)),
            Transaction::buy("V", d(2023, 4, 1), dec!(3), dec!(90), dec!(0)),
        ];

        let periods = svc().ownership_periods(&transactions).unwrap();

        assert_eq!(periods.len(), 2);
        assert_eq!(periods[1], OwnershipPeriod::new(d(2023, 4, 1), None, dec!(3)));
    }

    #[test]
    fn consecutive_buys_stack_quantity() {
        let transactions = vec![
            Transaction::buy("V", d(2023, 1, 1), dec!(10), dec!(100), dec!(0)),
            Transaction::buy("V", d(2023, 2, 1), dec!(5), dec!(105), dec!(0)),
        ];

        let periods = svc().ownership_periods(&transactions).unwrap();

        assert_eq!(
            periods,
            vec![
                OwnershipPeriod::new(d(2023, 1, 1), Some(d(2023, 2, 1)), dec!(10)),
                OwnershipPeriod::new(d(2023, 2, 1), None, dec!(15)),
            ]
        );
    }

    #[test]
    fn single_open_position() {
        let transactions = vec![Transaction::buy("V", d(2023, 1, 1), dec!(7), dec!(100), dec!(0))];

        let periods = svc().ownership_periods(&transactions).unwrap();

        assert_eq!(periods, vec![OwnershipPeriod::new(d(2023, 1, 1), None, dec!(7))]);
    }

    #[test]
    fn empty_ledger_has_no_periods() {
        assert!(svc().ownership_periods(&[]).unwrap().is_empty());
    }

    #[test]
    fn ledger_order_is_authoritative_not_date_order() {
        // Out-of-date-order input is replayed as-is, never re-sorted
        let transactions = vec![
            Transaction::buy("V", d(2023, 5, 1), dec!(10), dec!(100), dec!(0)),
            Transaction::buy("V", d(2023, 1, 1), dec!(5), dec!(100), dec!(0)),
        ];

        let periods = svc().ownership_periods(&transactions).unwrap();

        assert_eq!(periods[0].start_date, d(2023, 5, 1));
        assert_eq!(periods[1], OwnershipPeriod::new(d(2023, 1, 1), None, dec!(15)));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  oversell policies
// ═══════════════════════════════════════════════════════════════════

mod oversell {
    use super::*;

    #[test]
    fn reject_policy_errors_on_oversell() {
        let transactions = vec![
            Transaction::buy("V", d(2023, 1, 1), dec!(5), dec!(100), dec!(0)),
            Transaction::sell("V", d(2023, 2, 1), dec!(8), dec!(120), dec!(0)),
        ];

        let err = svc().ownership_periods(&transactions).unwrap_err();
        assert!(matches!(err, CoreError::InvariantViolation(_)));
    }

    #[test]
    fn reject_policy_errors_on_sell_with_nothing_held() {
        let transactions = vec![Transaction::sell("V", d(2023, 1, 1), dec!(1), dec!(120), dec!(0))];

        let err = svc().ownership_periods(&transactions).unwrap_err();
        assert!(matches!(err, CoreError::InvariantViolation(_)));
    }

    #[test]
    fn allow_policy_ignores_sell_with_nothing_held() {
        let svc = LedgerService::new(OversellPolicy::Allow);
        let transactions = vec![
            Transaction::sell("V", d(2023, 1, 1), dec!(3), dec!(120), dec!(0)),
            Transaction::buy("V", d(2023, 2, 1), dec!(5), dec!(100), dec!(0)),
        ];

        let periods = svc.ownership_periods(&transactions).unwrap();

        // The orphan sell never touches the running position
        assert_eq!(periods, vec![OwnershipPeriod::new(d(2023, 2, 1), None, dec!(5))]);
    }

    #[test]
    fn allow_policy_replays_oversell_as_is() {
        let svc = LedgerService::new(OversellPolicy::Allow);
        let transactions = vec![
            Transaction::buy("V", d(2023, 1, 1), dec!(5), dec!(100), dec!(0)),
            Transaction::sell("V", d(2023, 2, 1), dec!(8), dec!(120), dec!(0)),
        ];

        let periods = svc.ownership_periods(&transactions).unwrap();

        // Position goes short: the closed period is emitted, nothing reopens
        assert_eq!(
            periods,
            vec![OwnershipPeriod::new(d(2023, 1, 1), Some(d(2023, 2, 1)), dec!(5))]
        );
    }

    #[test]
    fn replay_returns_both_facts() {
        let transactions = vec![
            Transaction::buy("AAPL", d(2023, 1, 1), dec!(10), dec!(150), dec!(5)),
            Transaction::sell("AAPL", d(2023, 2, 1), dec!(5), dec!(160), dec!(3)),
            Transaction::buy("AAPL", d(2023, 3, 1), dec!(8), dec!(140), dec!(4)),
        ];

        let ledger = svc().replay(&transactions).unwrap();

        assert_eq!(ledger.money_invested, dec!(1832));
        assert_eq!(ledger.ownership_periods.len(), 3);
        assert_eq!(ledger.ownership_periods[2].quantity, dec!(13));
    }
}
