//! A listener that writes back into its own cell

use observable_cell::ObservableCell;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Re-entrant Listener Example ===\n");

    // Clamp the value into 0..=100 from inside a listener
    let percent = ObservableCell::new(0i32);
    let clamp = percent.clone();
    percent.subscribe(move |v| {
        let clamped = (*v).clamp(0, 100);
        if clamped != *v {
            println!("Clamping {v} to {clamped}");
            clamp.set(clamped);
        }
    });
    percent.subscribe(|v| println!("Percent is now {v}"));

    // The nested set finishes its own fan-out first, then the outer one
    // resumes and still reports the unclamped value.
    percent.set(42);
    percent.set(250);
    percent.set(-3);

    println!("\nFinal value: {percent}");
}
