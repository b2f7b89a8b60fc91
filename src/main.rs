use course_catalog::cli::run_cli;
use course_catalog::common::exception::CatalogError;

fn main() -> Result<(), CatalogError> {
    run_cli()
}
