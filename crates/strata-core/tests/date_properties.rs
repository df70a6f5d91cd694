//! Property tests for date arithmetic and calendars.

use proptest::prelude::*;
use strata_core::prelude::*;

fn any_date() -> impl Strategy<Value = Date> {
    (1990i32..2080, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| Date::from_ymd(y, m, d).unwrap())
}

proptest! {
    #[test]
    fn cds_imm_dates_bracket_the_date(date in any_date()) {
        let next = date.next_cds_imm_date().unwrap();
        let previous = date.previous_cds_imm_date().unwrap();

        prop_assert!(next.is_cds_imm_date());
        prop_assert!(previous.is_cds_imm_date());
        prop_assert!(previous <= date && date < next);
        prop_assert_eq!(previous.add_months(3).unwrap(), next);
    }

    #[test]
    fn business_day_moves_are_reversible(date in any_date(), days in 1i32..30) {
        let cal = WeekendCalendar;
        let start = cal.next_business_day(date);
        let forward = cal.add_business_days(start, days);
        prop_assert!(cal.is_business_day(forward));
        prop_assert_eq!(cal.add_business_days(forward, -days), start);
    }

    #[test]
    fn act365_is_additive(a in any_date(), gap1 in 0i64..2000, gap2 in 0i64..2000) {
        let b = a.add_days(gap1);
        let c = b.add_days(gap2);
        let dc = DayCount::Act365Fixed;
        let lhs = dc.year_fraction(a, c);
        let rhs = dc.year_fraction(a, b) + dc.year_fraction(b, c);
        prop_assert!((lhs - rhs).abs() < 1e-12);
    }
}
