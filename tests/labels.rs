use asmvm::labels::Search;
use asmvm::{IntExecutor, LineDecoder, Machine, MachineConfig, Program, ScriptedConsole, Step};
use pretty_assertions::assert_eq;

#[test]
fn forward_branch_scans_without_executing() {
    let program = Program::parse("B L1\nADD R0 R0 #1\nL1: HALT");
    let mut m = Machine::new(MachineConfig::default());
    let summary = program
        .run(&mut m, &LineDecoder::new(), &IntExecutor, &mut ScriptedConsole::default())
        .unwrap();
    assert!(summary.halted);
    assert_eq!(m.regs.read(0), 0);
    assert_eq!(m.search, Search::Idle);
}

#[test]
fn forward_search_step_by_step() {
    let dec = LineDecoder::new();
    let mut m = Machine::new(MachineConfig::default());
    let mut io = ScriptedConsole::default();

    assert_eq!(m.step("B done", 0, &dec, &IntExecutor, &mut io).unwrap(), Step::Next(1));
    assert_eq!(
        m.search,
        Search::Searching {
            target: "done".into(),
            origin: 0
        }
    );
    // Garbage is not decoded while searching.
    assert_eq!(m.step("not an instruction", 1, &dec, &IntExecutor, &mut io).unwrap(), Step::Next(2));
    assert_eq!(m.step("HALT", 2, &dec, &IntExecutor, &mut io).unwrap(), Step::Next(3));
    assert!(!m.halted);
    // Other labels passed on the way are recorded.
    assert_eq!(m.step("other:", 3, &dec, &IntExecutor, &mut io).unwrap(), Step::Next(4));
    assert_eq!(m.labels.get("other"), Some(4));
    assert_eq!(m.step("done:", 4, &dec, &IntExecutor, &mut io).unwrap(), Step::Next(5));
    assert_eq!(m.search, Search::Idle);
}

#[test]
fn forward_search_lands_on_inline_instruction() {
    let program = Program::parse("MOV R0 #1\nB out\nMOV R0 #2\nout: OUT R0\nHALT");
    let mut m = Machine::new(MachineConfig::default());
    let mut io = ScriptedConsole::default();
    program
        .run(&mut m, &LineDecoder::new(), &IntExecutor, &mut io)
        .unwrap();
    assert_eq!(io.outputs, vec![1]);
    assert_eq!(m.labels.get("out"), Some(3));
}

#[test]
fn labels_found_during_a_search_serve_later_backward_jumps() {
    let src = "\
B start
again:
ADD R0 R0 #1
start:
ADD R1 R1 #1
CMP R1 #3
BLT again
HALT";
    let mut m = Machine::new(MachineConfig::default());
    Program::parse(src)
        .run(&mut m, &LineDecoder::new(), &IntExecutor, &mut ScriptedConsole::default())
        .unwrap();
    assert_eq!(m.regs.read(1), 3);
    assert_eq!(m.regs.read(0), 2);
    assert_eq!(m.labels.get("again"), Some(2));
    assert_eq!(
        m.labels.iter().collect::<Vec<_>>(),
        vec![("again", 2), ("start", 4)]
    );
}

#[test]
fn redefinition_can_be_allowed() {
    let src = "x:\nx:\nHALT";
    let mut m = Machine::new(MachineConfig {
        allow_label_redefinition: true,
        ..MachineConfig::default()
    });
    Program::parse(src)
        .run(&mut m, &LineDecoder::new(), &IntExecutor, &mut ScriptedConsole::default())
        .unwrap();
    assert_eq!(m.labels.get("x"), Some(2));
}
