//! Integration tests for end-to-end parsing.
//!
//! These tests run the complete pipeline from source text through
//! tokenization and parsing, and check the printed form of parsed
//! programs parses back to the same tree.

use blparse::{
    ast::{
        ast::Program,
        conditions::Condition,
        statements::{Block, Statement},
    },
    errors::errors::ErrorImpl,
    lexer::lexer::{tokenize, tokens_from_words},
    parser::parser::{parse, parse_block},
    render_error,
};
use indexmap::IndexMap;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

const PRIMITIVES: [&str; 5] = ["move", "turnleft", "turnright", "infect", "skip"];

fn random_block(rng: &mut StdRng, depth: usize, callees: &[String]) -> Block {
    let len = rng.gen_range(0..4);
    let body = (0..len)
        .map(|_| random_statement(rng, depth, callees))
        .collect::<Vec<_>>();
    Block::new(body)
}

fn random_statement(rng: &mut StdRng, depth: usize, callees: &[String]) -> Statement {
    let condition = *Condition::ALL.choose(rng).unwrap();
    let choice = if depth == 0 { 0 } else { rng.gen_range(0..4) };

    match choice {
        1 => Statement::If {
            condition,
            then_block: random_block(rng, depth - 1, callees),
        },
        2 => Statement::IfElse {
            condition,
            then_block: random_block(rng, depth - 1, callees),
            else_block: random_block(rng, depth - 1, callees),
        },
        3 => Statement::While {
            condition,
            body: random_block(rng, depth - 1, callees),
        },
        _ => Statement::call(callees.choose(rng).unwrap().clone()),
    }
}

fn random_program(seed: u64) -> Program {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut callees: Vec<String> = PRIMITIVES.iter().map(|p| p.to_string()).collect();

    let mut context = IndexMap::new();
    for _ in 0..rng.gen_range(0..5) {
        let name = format!("step-{}", rng.gen_range(0..8));
        let depth = rng.gen_range(0..4);
        let body = random_block(&mut rng, depth, &callees);
        if context.insert(name.clone(), body).is_none() {
            callees.push(name);
        }
    }

    let depth = rng.gen_range(1..6);
    let body = random_block(&mut rng, depth, &callees);

    Program::new(format!("Generated{}", seed), context, body)
}

#[test]
fn test_printed_programs_parse_back_to_the_same_tree() {
    for seed in 0..200 {
        let program = random_program(seed);
        let source = program.to_string();

        let (_, result) = parse(tokenize(&source, Some(format!("gen{}.bl", seed))));
        let reparsed = result.unwrap_or_else(|e| panic!("seed {}: {}\n{}", seed, e, source));

        assert_eq!(reparsed, program, "seed {}", seed);
    }
}

#[test]
fn test_parse_consumes_everything_but_the_sentinel() {
    for seed in 0..50 {
        let source = random_program(seed).to_string();
        let tokens = tokenize(&source, None);
        let len = tokens.len();

        let (parser, result) = parse(tokens);

        assert!(result.is_ok());
        assert_eq!(parser.consumed(), len - 1);
        assert_eq!(parser.remaining().len(), 1);
    }
}

#[test]
fn test_printed_blocks_parse_back_to_the_same_block() {
    let callees: Vec<String> = PRIMITIVES.iter().map(|p| p.to_string()).collect();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..100 {
        let block = random_block(&mut rng, 4, &callees);
        let (parser, result) = parse_block(tokenize(&block.to_string(), None));

        assert_eq!(result.unwrap(), block);
        assert_eq!(parser.remaining().len(), 1);
    }
}

#[test]
fn test_parse_sample_program() {
    let source = "\
# Walks forward, turning around at walls and infecting enemies.
PROGRAM Patrol IS

  INSTRUCTION turn-around IS
    turnleft
    turnleft
  END turn-around

  INSTRUCTION step IS
    IF next-is-enemy THEN
      infect
    ELSE
      IF next-is-wall THEN
        turn-around
      ELSE
        move
      END IF
    END IF
  END step

BEGIN
  WHILE true DO
    step
  END WHILE
END Patrol
";
    let (_, result) = parse(tokenize(source, Some("patrol.bl".to_string())));
    let program = result.unwrap();

    assert_eq!(program.name, "Patrol");
    assert_eq!(program.context.len(), 2);
    assert_eq!(
        program.instruction("turn-around"),
        Some(&Block::new(vec![
            Statement::call("turnleft"),
            Statement::call("turnleft")
        ]))
    );
    assert_eq!(program.to_string(), source.lines().skip(1).collect::<Vec<_>>().join("\n") + "\n");
}

#[test]
fn test_duplicate_instruction_is_rejected_before_begin() {
    let source = "PROGRAM P IS INSTRUCTION f IS move END f INSTRUCTION f IS turnleft END f BEGIN f END P";
    let tokens = tokens_from_words(&source.split_whitespace().collect::<Vec<_>>());

    let (parser, result) = parse(tokens);

    assert_eq!(
        result.unwrap_err().kind(),
        &ErrorImpl::DuplicateInstruction {
            name: "f".to_string()
        }
    );
    assert_eq!(parser.current_token().value, "BEGIN");
}

#[test]
fn test_mismatched_delimiter_produces_no_statement() {
    let source = "PROGRAM P IS BEGIN IF true THEN move END WHILE END P";
    let (_, result) = parse(tokenize(source, None));

    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorImpl::MismatchedDelimiter { construct, .. } if construct == "IF"
    ));
}

#[test]
fn test_truncated_program_is_reported() {
    let source = "PROGRAM P IS\nBEGIN\n  WHILE true DO\n    move\n";
    let (_, result) = parse(tokenize(source, Some("short.bl".to_string())));
    let error = result.unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    let rendered = render_error(&error, source, "short.bl");
    assert!(rendered.contains("input ended"));
    assert!(rendered.contains("-> short.bl"));
    assert!(rendered.contains("4 | move"));
}

#[test]
fn test_program_serializes_to_json() {
    let (_, result) = parse(tokenize(
        "PROGRAM P IS INSTRUCTION f IS move END f BEGIN WHILE next-is-empty DO f END WHILE END P",
        None,
    ));
    let json = serde_json::to_value(result.unwrap()).unwrap();

    assert_eq!(json["name"], "P");
    assert_eq!(json["context"]["f"]["body"][0]["kind"], "Call");
    assert_eq!(json["context"]["f"]["body"][0]["instruction"], "move");
    assert_eq!(json["body"]["body"][0]["kind"], "While");
    assert_eq!(json["body"]["body"][0]["condition"], "NEXT_IS_EMPTY");
}

#[test]
fn test_deeply_nested_program_prints_and_parses_back() {
    let mut innermost = Block::new(vec![Statement::call("move")]);
    for level in 0..2_000 {
        let statement = if level % 2 == 0 {
            Statement::While {
                condition: Condition::NextIsEmpty,
                body: innermost,
            }
        } else {
            Statement::IfElse {
                condition: Condition::Random,
                then_block: innermost,
                else_block: Block::new(vec![Statement::call("skip")]),
            }
        };
        innermost = Block::new(vec![statement]);
    }
    let program = Program::new("Deep", IndexMap::new(), innermost);

    let source = program.to_string();
    assert!(source.starts_with("PROGRAM Deep IS\n\nBEGIN\n  IF random THEN\n    WHILE next-is-empty DO\n"));

    let (parser, result) = parse(tokenize(&source, Some("deep.bl".to_string())));
    let reparsed = result.unwrap_or_else(|e| panic!("{}", e));
    assert_eq!(parser.remaining().len(), 1);
    assert_eq!(reparsed.to_string(), source);
}
