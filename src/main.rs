fn main() -> Result<(), Box<dyn std::error::Error>> {
    weaver::runtime::run()
}
