use repositories::Registry;

fn main() -> std::io::Result<()> {
    let schema = graphql::build_schema(Registry::new());
    // Print the schema in SDL format
    println!("{}", &schema.sdl());
    Ok(())
}
