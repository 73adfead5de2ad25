mod health;
mod probes;

macros_utils::routes! {
    mod health,
    mod probes,
}
