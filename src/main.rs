fn main() {
    nes_submit::cli::run();
}
