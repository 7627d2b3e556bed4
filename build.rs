fn main() {
    // Emits ESP-IDF link/env metadata when building for the espidf
    // target; a no-op on the host.
    embuild::espidf::sysenv::output();
}
