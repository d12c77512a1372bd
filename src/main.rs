fn main() {
    templog_pipeline::cli::run();
}
