#![no_main]

use libfuzzer_sys::fuzz_target;
use schooldir::directory::{DEFAULT_RESULT_LIMIT, SchoolDirectory};

const SOURCE: &str = "district,block,udise_code,school_name,category,area,management
Khordha,Jatni,21150100101,Govt High School,Secondary,Urban,Government
Puri,Gop,21180200303,UGME School,Primary,Rural,Government
Mayurbhanj,Baripada,21230100101,ÅÄÖ İnstitute,Primary,Rural,Private
";

fuzz_target!(|query: &str| {
    // Arbitrary queries, including non-ASCII case folding, must not panic
    let directory = SchoolDirectory::parse(SOURCE);
    let results = directory.search(query);
    assert!(results.len() <= DEFAULT_RESULT_LIMIT);
    if query.trim().is_empty() {
        assert!(results.is_empty());
    }

    let _ = directory.find_by_exact_code(query);
    let _ = schooldir::output::find_ignore_case("Govt High School", query);
});
