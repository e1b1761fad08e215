use criterion::{black_box, criterion_group, criterion_main, Criterion};
use decimal_spin::{DecimalSpinAdapter, Interaction, LocaleSpec, RangeConfig};

fn bench_text_from_value(c: &mut Criterion) {
    let adapter = DecimalSpinAdapter::with_locale(
        RangeConfig::new(-1.0e6, 1.0e6, 3),
        LocaleSpec::en_us(),
    );

    c.bench_function("text_from_value_grouped_3dp", |b| {
        b.iter(|| adapter.text_from_value(black_box(123_456_789)))
    });
}

fn bench_value_from_text(c: &mut Criterion) {
    let adapter = DecimalSpinAdapter::with_locale(
        RangeConfig::new(-1.0e6, 1.0e6, 3),
        LocaleSpec::de_de(),
    );

    c.bench_function("value_from_text_grouped_3dp", |b| {
        b.iter(|| adapter.value_from_text(black_box("123.456,789")))
    });
}

fn bench_reconfigure(c: &mut Criterion) {
    let mut adapter = DecimalSpinAdapter::new(RangeConfig::default());
    adapter.set_value(42.5);

    c.bench_function("set_decimals_recompute", |b| {
        let mut decimals = 0u32;
        b.iter(|| {
            decimals = (decimals + 1) % 8;
            adapter.set_decimals(black_box(decimals));
        })
    });
}

fn bench_step_interaction(c: &mut Criterion) {
    let mut adapter = DecimalSpinAdapter::new(RangeConfig::new(0.0, 1.0e4, 2));
    adapter.on_value_modified(|v| {
        black_box(*v);
    });

    c.bench_function("step_up_down_commit", |b| {
        b.iter(|| {
            adapter.interact(Interaction::StepUp);
            adapter.interact(Interaction::StepDown);
        })
    });
}

criterion_group!(
    benches,
    bench_text_from_value,
    bench_value_from_text,
    bench_reconfigure,
    bench_step_interaction
);
criterion_main!(benches);
