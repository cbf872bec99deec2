//! Basic observable cell example

use observable_cell::ObservableCell;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Basic Cell Example ===\n");

    // Create a cell with initial value and one listener
    let count = ObservableCell::with_listener(0, |v| {
        println!("Count changed to: {v}");
    });

    println!("Setting count to 0 (unchanged)...");
    count.set(0);

    println!("Setting count to 5...");
    count.set(5);

    println!("Updating count by adding 3...");
    count.update(|n| *n += 3);

    // A second listener, kept so it can be removed later
    let doubled = count.subscribe(|v| println!("Doubled: {}", v * 2));

    println!("Forcing a notification...");
    count.notify();

    println!("Removing the doubling listener...");
    count.remove_listener(&doubled);
    count.set(10);

    println!("Disposing...");
    count.dispose();
    count.set(99);
    println!("Value after dispose: {count}");
}
