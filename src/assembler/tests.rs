// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// End-to-end assembly scenarios.

use super::cli::{output_path_for, run_with, Cli};
use super::error::{AsmErrorKind, TranslateError};
use super::{translate, Assembler};

use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

fn bytes(source: &str) -> Vec<u8> {
    match translate(source) {
        Ok(bytes) => bytes,
        Err(err) => panic!("assembly failed for {source:?}: {err}"),
    }
}

fn error(source: &str) -> TranslateError {
    match translate(source) {
        Ok(bytes) => panic!("assembly unexpectedly produced {bytes:02X?}"),
        Err(err) => err,
    }
}

fn create_temp_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join(format!("test-{label}-{}-{nanos}", process::id()));
    fs::create_dir_all(&dir).expect("Create temp dir");
    dir
}

#[test]
fn immediate_operand() {
    assert_eq!(bytes("LDA #$05\n"), vec![0xA9, 0x05]);
}

#[test]
fn zero_page_via_size_inference() {
    assert_eq!(bytes("LDA $10\n"), vec![0xA5, 0x10]);
}

#[test]
fn explicit_absolute_via_two_byte_literal() {
    assert_eq!(bytes("LDA $0010\n"), vec![0xAD, 0x10, 0x00]);
}

#[test]
fn org_anchors_absolute_jump_targets() {
    let source = ".org $8000\nstart: LDA #$01\nJMP start\n";
    assert_eq!(bytes(source), vec![0xA9, 0x01, 0x4C, 0x00, 0x80]);
}

#[test]
fn db_emits_one_byte_per_parameter() {
    assert_eq!(bytes(".db $01, $02, $03\n"), vec![0x01, 0x02, 0x03]);
}

#[test]
fn backward_branch() {
    assert_eq!(
        bytes("back: NOP\nNOP\nBNE back\n"),
        vec![0xEA, 0xEA, 0xD0, 0xFC]
    );
}

#[test]
fn constant_masks_select_bytes() {
    assert_eq!(bytes("FOO = $1234\nLDA #<FOO\n"), vec![0xA9, 0x34]);
    assert_eq!(bytes("FOO = $1234\nLDA #>FOO\n"), vec![0xA9, 0x12]);
}

#[test]
fn absolute_indexed_shrinks_to_zero_page() {
    assert_eq!(bytes("LDA $0010,X\n"), vec![0xB5, 0x10]);
}

#[test]
fn a_small_program_assembles_end_to_end() {
    let source = "\
; zero a page of memory
COUNT = $FF
        .org $8000
init:   LDX #$00
        LDA #$00
loop:   STA $0200,X
        INX
        CPX #COUNT
        BNE loop
        JMP done
done:   RTS
";
    assert_eq!(
        bytes(source),
        vec![
            0xA2, 0x00, // LDX #$00
            0xA9, 0x00, // LDA #$00
            0x9D, 0x00, 0x02, // STA $0200,X
            0xE8, // INX
            0xE0, 0xFF, // CPX #COUNT
            0xD0, 0xF8, // BNE loop (back 8)
            0x4C, 0x0F, 0x80, // JMP done (file offset 15 + org)
            0x60, // RTS
        ]
    );
}

#[test]
fn comments_labels_and_constants_emit_nothing() {
    let source = "; header\nV = $01\nlabel:\nNOP ; trailing\n";
    assert_eq!(bytes(source), vec![0xEA]);
}

#[test]
fn reassembly_is_idempotent() {
    let source = ".org $8000\nstart: LDA #$01\nBNE start\nJMP start\n.db $FF\n";
    assert_eq!(bytes(source), bytes(source));
}

#[test]
fn literal_round_trip_widths() {
    // A literal of declared width w emits exactly w bytes of its value.
    assert_eq!(bytes("LDA #$7F\n"), vec![0xA9, 0x7F]);
    assert_eq!(bytes(".dw $ABCD\n"), vec![0xCD, 0xAB]);
    assert_eq!(bytes(".db %10110101\n"), vec![0xB5]);
    assert_eq!(bytes("LDA %0001001000110100\n"), vec![0xAD, 0x34, 0x12]);
}

#[test]
fn statements_accumulate_across_reads() {
    let mut assembler = Assembler::new();
    assembler.read("LDA #$01\n").unwrap();
    assembler.read("RTS\n").unwrap();
    assert_eq!(assembler.statements().len(), 2);
    assert_eq!(assembler.assemble().unwrap(), vec![0xA9, 0x01, 0x60]);
}

#[test]
fn lexer_errors_carry_line_and_column() {
    let err = error("NOP\nLDA @$10\n");
    assert_eq!(err.error.kind(), AsmErrorKind::Lexer);
    assert_eq!(err.line, 2);
    assert_eq!(err.column, Some(5));
}

#[test]
fn parser_errors_carry_the_line() {
    let err = error("NOP\nLDA ,\n");
    assert_eq!(err.error.kind(), AsmErrorKind::Parser);
    assert_eq!(err.line, 2);
}

#[test]
fn undefined_constant_reference() {
    let err = error("LDA #MISSING\n");
    assert_eq!(err.error.kind(), AsmErrorKind::Assembler);
    assert!(err.error.message().contains("undefined constant MISSING"));
}

#[test]
fn duplicate_label_reports_second_definition() {
    let err = error("twice: NOP\ntwice: NOP\n");
    assert!(err.error.message().contains("duplicate label"));
    assert_eq!(err.line, 2);
}

#[test]
fn operand_overflow_for_declared_size() {
    let err = error("V = $FF + $01\nNOP\n");
    assert!(err.error.message().contains("too large"));
}

#[test]
fn malformed_org_parameter() {
    let err = error(".org $10 + $20\n");
    assert!(err.error.message().contains("ORG directive"));
}

#[test]
fn branch_out_of_range() {
    let mut source = String::from("start: NOP\n");
    for _ in 0..200 {
        source.push_str("NOP\n");
    }
    source.push_str("BNE start\n");
    let err = error(&source);
    assert!(err.error.message().contains("out of range"));
}

#[test]
fn cli_assembles_a_single_file_to_a_sibling_bin() {
    let dir = create_temp_dir("cli-single");
    let input = dir.join("prog.asm");
    fs::write(&input, "LDA #$05\nRTS\n").expect("write source");

    let cli = Cli {
        input: input.clone(),
        output: None,
    };
    run_with(&cli).expect("run should succeed");

    let output = fs::read(output_path_for(&input)).expect("read output");
    assert_eq!(output, vec![0xA9, 0x05, 0x60]);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_honors_an_explicit_output_path() {
    let dir = create_temp_dir("cli-output");
    let input = dir.join("prog.asm");
    let output = dir.join("custom.bin");
    fs::write(&input, "NOP\n").expect("write source");

    let cli = Cli {
        input,
        output: Some(output.clone()),
    };
    run_with(&cli).expect("run should succeed");
    assert_eq!(fs::read(&output).expect("read output"), vec![0xEA]);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_walks_directories_recursively() {
    let dir = create_temp_dir("cli-dir");
    let nested = dir.join("nested");
    fs::create_dir_all(&nested).expect("create nested dir");
    fs::write(dir.join("a.asm"), "NOP\n").expect("write a");
    fs::write(nested.join("b.asm"), "RTS\n").expect("write b");
    fs::write(dir.join("ignored.txt"), "not assembly").expect("write other");

    let cli = Cli {
        input: dir.clone(),
        output: None,
    };
    run_with(&cli).expect("run should succeed");

    assert_eq!(fs::read(dir.join("a.bin")).expect("read a.bin"), vec![0xEA]);
    assert_eq!(
        fs::read(nested.join("b.bin")).expect("read b.bin"),
        vec![0x60]
    );
    assert!(!dir.join("ignored.bin").exists());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_directory_mode_continues_after_a_failure() {
    let dir = create_temp_dir("cli-dir-fail");
    fs::write(dir.join("bad.asm"), "LDA @$10\n").expect("write bad");
    fs::write(dir.join("good.asm"), "NOP\n").expect("write good");

    let cli = Cli {
        input: dir.clone(),
        output: None,
    };
    let err = run_with(&cli).expect_err("run should fail");
    assert_eq!(err.diagnostics().len(), 1);
    assert!(!dir.join("bad.bin").exists());
    assert_eq!(
        fs::read(dir.join("good.bin")).expect("read good.bin"),
        vec![0xEA]
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn no_output_is_written_on_failure() {
    let dir = create_temp_dir("cli-no-partial");
    let input = dir.join("prog.asm");
    fs::write(&input, "NOP\nLDA #MISSING\n").expect("write source");

    let cli = Cli {
        input: input.clone(),
        output: None,
    };
    let err = run_with(&cli).expect_err("run should fail");
    assert_eq!(err.error().kind(), AsmErrorKind::Assembler);
    assert!(!output_path_for(&input).exists());

    let diag = &err.diagnostics()[0];
    let rendered = diag.format_with_context(false);
    assert!(rendered.contains("prog.asm:2"));
    assert!(rendered.contains("LDA #MISSING"));
    let _ = fs::remove_dir_all(&dir);
}
