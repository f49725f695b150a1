//! Performance benchmarks for the tax/contribution engine.
//!
//! The simulators recompute on every keystroke of a reactive form, so
//! the engine must stay cheap under high call frequency:
//! - Single bracket walk: < 1μs mean
//! - Full income-tax simulation: < 10μs mean
//! - Batch of 1000 recomputations: < 10ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use std::str::FromStr;

use tributo_engine::calculation::{
    apply_schedule, calculate_contribution, calculate_income_tax, calculate_withholding,
};
use tributo_engine::config::ReferenceTable;
use tributo_engine::models::{ContributionInput, ContributorCategory, IncomeTaxInput};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn income_tax_input() -> IncomeTaxInput {
    IncomeTaxInput {
        taxable_income: dec("85000.00"),
        exempt_income: dec("12000.00"),
        social_security_paid: dec("7200.00"),
        medical_expenses: dec("4500.00"),
        education_expenses: dec("6000.00"),
        dependents: 2,
        alimony_paid: Decimal::ZERO,
        cash_book_deductions: Decimal::ZERO,
        tax_withheld: dec("6500.00"),
        chosen_regime: None,
        senior_citizen: false,
    }
}

fn bench_bracket_walk(c: &mut Criterion) {
    let table = ReferenceTable::builtin_2025().expect("builtin table");
    let schedule = table.monthly_withholding();

    c.bench_function("bracket_walk_monthly_table", |b| {
        b.iter(|| apply_schedule(black_box(schedule), black_box(dec("6500.00"))))
    });
}

fn bench_single_simulations(c: &mut Criterion) {
    let table = ReferenceTable::builtin_2025().expect("builtin table");
    let input = income_tax_input();
    let contribution_input = ContributionInput {
        category: ContributorCategory::Employee,
        declared_amount: dec("4200.00"),
        voluntary_plan: None,
    };

    c.bench_function("income_tax_simulation", |b| {
        b.iter(|| calculate_income_tax(black_box(&input), black_box(&table)))
    });

    c.bench_function("contribution_simulation", |b| {
        b.iter(|| calculate_contribution(black_box(&contribution_input), black_box(&table)))
    });

    c.bench_function("withholding_simulation", |b| {
        b.iter(|| calculate_withholding(black_box(dec("9000.00")), black_box(&table)))
    });
}

fn bench_reactive_form_batches(c: &mut Criterion) {
    let table = ReferenceTable::builtin_2025().expect("builtin table");
    let input = income_tax_input();

    let mut group = c.benchmark_group("reactive_form_recomputation");
    for batch_size in [100u64, 1000] {
        group.throughput(Throughput::Elements(batch_size));
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &batch_size,
            |b, &batch_size| {
                b.iter(|| {
                    for _ in 0..batch_size {
                        let _ = calculate_income_tax(black_box(&input), black_box(&table));
                    }
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_bracket_walk,
    bench_single_simulations,
    bench_reactive_form_batches
);
criterion_main!(benches);
