use criterion::{black_box, criterion_group, criterion_main, Criterion};
use srcweave_args::{parse_arguments, serialize, CallSiteCollector};

// Argument lists as they show up in component definitions
const ARGUMENTS: &str = r#"
    'Button',
    { label: 'Click me', disabled: false, size: 'md', onClick },
    [primary, secondary, { tone: 'danger' }],
    (event: MouseEvent): void => { handle(event) },
    useState<{ open: boolean }>({ open: false }),
    defaults as ButtonProps,
    createTheme<Theme>(),
    value => value * 2,
    Component<{ foo: string }>
"#;

const SOURCE: &str = r#"
import { defineArgs } from './args';

// defineArgs(ignored, in, comment)
export const primary = defineArgs({ label: 'Primary', variant: 'solid' });
export const secondary = defineArgs<Props>({ label: 'Secondary' }, [a, b]);
const text = "defineArgs(not, a, call)";
export const ghost = defineArgs({ ...primary, variant: 'ghost' });
"#;

fn bench_parse_arguments(c: &mut Criterion) {
    c.bench_function("parse_arguments", |b| {
        b.iter(|| parse_arguments(black_box(ARGUMENTS)))
    });
}

fn bench_round_trip(c: &mut Criterion) {
    let parsed = parse_arguments(ARGUMENTS);
    c.bench_function("serialize", |b| b.iter(|| serialize(black_box(&parsed))));
}

fn bench_collect_call_sites(c: &mut Criterion) {
    let collector = CallSiteCollector::new().with_callee("defineArgs");
    c.bench_function("collect_call_sites", |b| {
        b.iter(|| collector.collect(black_box(SOURCE)))
    });
}

criterion_group!(
    benches,
    bench_parse_arguments,
    bench_round_trip,
    bench_collect_call_sites
);
criterion_main!(benches);
