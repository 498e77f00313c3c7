//! Basic example of using the N-Queens engine

use queens_core::{
    analyze, search_space_size, DifficultyRating, Position, Session, Solution, Solver,
};

fn main() {
    // Solve the classic 8x8 board
    println!("Solving the classic 8x8 board...\n");
    let solver = Solver::new();
    if let Some(solution) = solver.first_solution(8) {
        println!("First solution:");
        print_board(&solution);
    }

    // Show some stats
    let analysis = analyze(8);
    println!("Total solutions: {}", analysis.total_solutions);
    println!(
        "Search space: {:.2e} candidate boards",
        search_space_size(8)
    );
    println!("Rated difficulty: {}\n", DifficultyRating::for_size(8));

    // Play through a small board interactively
    println!("--- Playing a 4x4 board ---\n");
    let mut session = Session::new(4);
    session.place_or_remove(Position::new(0, 1));
    session.place_or_remove(Position::new(1, 3));
    println!(
        "Placed {} of {} queens by hand",
        session.placements().len(),
        session.board_size()
    );

    // Let hints finish the board (each hint flags a safe cell)
    while let Some(pos) = session.hint() {
        println!("Hint suggests {}", pos);
        session.place_or_remove(pos);
    }
    println!("\nSolved: {}", session.is_won());
    println!("Moves: {}", session.move_count());
    println!("Time: {}", session.elapsed_string());

    // Undo rewinds the last placement and un-wins the board
    session.undo();
    println!(
        "After undo: {} queens, solved: {}",
        session.placements().len(),
        session.is_won()
    );
}

fn print_board(solution: &Solution) {
    for row in 0..solution.size() {
        let mut line = String::new();
        for col in 0..solution.size() {
            line.push(if solution.col_in_row(row) == col { 'Q' } else { '.' });
            line.push(' ');
        }
        println!("{}", line);
    }
    println!();
}
