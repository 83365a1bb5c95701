#![no_main]

use libfuzzer_sys::fuzz_target;
use sable_syntax::ParseConfig;
use sable_syntax::lexer::lex;
use sable_syntax::parser::parse_with_resolver;
use sable_syntax::resolver::MemoryResolver;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = lex(s);
        // Includes resolve against an empty in-memory map so the fuzzer never touches the filesystem.
        let _ = parse_with_resolver(s, &ParseConfig::new(), &MemoryResolver::new());
    }
});
