// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for x816.

fn main() {
    let use_color = std::env::var("NO_COLOR").is_err();
    if let Err(err) = x816::assembler::run() {
        for diag in err.diagnostics() {
            eprintln!("{}", diag.format_with_context(use_color));
        }
        eprintln!("{err}");
        std::process::exit(1);
    }
}
