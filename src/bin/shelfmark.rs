//! Interactive menu shell over the catalog store.
//!
//! The shell owns all terminal I/O: prompting, input validation and
//! re-prompting, screen clearing, and column-formatted output. Catalog rules
//! live in the library; anything the store refuses is rendered here as a
//! plain message and the menu comes back. End of input anywhere behaves
//! like choosing Exit.

use anyhow::Result;
use shelfmark::{Book, BookId, Catalog, resolve_config};
use std::io::{self, BufRead, Write};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

#[derive(Clone, Copy, Eq, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

fn run() -> Result<()> {
    let config = resolve_config()?;
    let mut catalog = Catalog::open(config);

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        clear_screen();
        print_menu(&catalog);
        let Some(choice) = prompt_line(&mut input, "Enter choice: ")? else {
            break;
        };
        let flow = match choice.trim() {
            "1" => add_books(&mut catalog, &mut input)?,
            "2" => update_book(&mut catalog, &mut input)?,
            "3" => delete_book(&mut catalog, &mut input)?,
            "4" => search_books(&catalog, &mut input)?,
            "5" => issue_book(&mut catalog, &mut input)?,
            "6" => return_book(&mut catalog, &mut input)?,
            "7" => show_all(&catalog, &mut input)?,
            "8" => show_issued(&catalog, &mut input)?,
            "9" => show_available(&catalog, &mut input)?,
            "10" => show_statistics(&catalog, &mut input)?,
            "11" => {
                println!("Goodbye.");
                Flow::Quit
            }
            _ => pause(&mut input, "Invalid choice.")?,
        };
        if flow == Flow::Quit {
            break;
        }
    }
    Ok(())
}

fn print_menu(catalog: &Catalog) {
    println!("===== Library Management =====");
    println!("catalog file: {}", catalog.config().storage_path.display());
    println!();
    println!(" 1. Add book");
    println!(" 2. Update book");
    println!(" 3. Delete book");
    println!(" 4. Search books");
    println!(" 5. Issue book");
    println!(" 6. Return book");
    println!(" 7. Show all books");
    println!(" 8. Show issued books");
    println!(" 9. Show available books");
    println!("10. Show statistics");
    println!("11. Exit");
}

fn add_books(catalog: &mut Catalog, input: &mut impl BufRead) -> Result<Flow> {
    clear_screen();
    let Some(title) = prompt_nonempty(input, "Enter title: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(author) = prompt_nonempty(input, "Enter author: ")? else {
        return Ok(Flow::Quit);
    };

    let base = loop {
        let Some(id) = prompt_u32(input, "Enter starting book id (> 0): ")? else {
            return Ok(Flow::Quit);
        };
        if catalog.exists(BookId(id)) {
            println!("Id {id} is already taken. Pick another starting id.");
            continue;
        }
        break id;
    };
    let Some(quantity) = prompt_u32(input, "How many copies? ")? else {
        return Ok(Flow::Quit);
    };

    clear_screen();
    for offset in 0..quantity {
        let Some(id) = base.checked_add(offset) else {
            println!("Stopping: book ids exhausted at {}.", u32::MAX);
            break;
        };
        match catalog.add(Book::new(BookId(id), title.clone(), author.clone())) {
            Ok(()) => println!("Added copy with id {id}."),
            Err(err) => println!("Could not add copy with id {id}: {err}"),
        }
    }
    pause(input, "")
}

fn update_book(catalog: &mut Catalog, input: &mut impl BufRead) -> Result<Flow> {
    clear_screen();
    let Some(id) = prompt_u32(input, "Enter book id to update: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(title) = prompt_line(input, "New title (blank keeps current): ")? else {
        return Ok(Flow::Quit);
    };
    let Some(author) = prompt_line(input, "New author (blank keeps current): ")? else {
        return Ok(Flow::Quit);
    };

    clear_screen();
    match catalog.update(BookId(id), title.trim(), author.trim()) {
        Ok(()) => println!("Book updated."),
        Err(err) => println!("{err}"),
    }
    pause(input, "")
}

fn delete_book(catalog: &mut Catalog, input: &mut impl BufRead) -> Result<Flow> {
    clear_screen();
    let Some(id) = prompt_u32(input, "Enter book id to delete: ")? else {
        return Ok(Flow::Quit);
    };
    clear_screen();
    match catalog.delete(BookId(id)) {
        Ok(()) => println!("Book deleted."),
        Err(err) => println!("{err}"),
    }
    pause(input, "")
}

fn search_books(catalog: &Catalog, input: &mut impl BufRead) -> Result<Flow> {
    clear_screen();
    let Some(term) = prompt_line(input, "Search term (title/author/id): ")? else {
        return Ok(Flow::Quit);
    };
    clear_screen();
    let found = catalog.search(term.trim());
    if found.is_empty() {
        println!("No matching book found.");
    } else {
        print_table(&found);
    }
    pause(input, "")
}

fn issue_book(catalog: &mut Catalog, input: &mut impl BufRead) -> Result<Flow> {
    clear_screen();
    let available = catalog.available();
    if available.is_empty() {
        return pause(input, "No books are available for issuing.");
    }
    println!("Available books:");
    print_table(&available);

    let Some(id) = prompt_u32(input, "Enter book id to issue: ")? else {
        return Ok(Flow::Quit);
    };
    clear_screen();
    match catalog.issue(BookId(id)) {
        Ok(()) => println!("Book issued."),
        Err(err) => println!("{err}"),
    }
    pause(input, "")
}

fn return_book(catalog: &mut Catalog, input: &mut impl BufRead) -> Result<Flow> {
    clear_screen();
    let Some(id) = prompt_u32(input, "Enter book id to return: ")? else {
        return Ok(Flow::Quit);
    };
    clear_screen();
    match catalog.return_book(BookId(id)) {
        Ok(()) => println!("Book returned."),
        Err(err) => println!("{err}"),
    }
    pause(input, "")
}

fn show_all(catalog: &Catalog, input: &mut impl BufRead) -> Result<Flow> {
    clear_screen();
    println!("====== Library books ======");
    let books: Vec<&Book> = catalog.all().iter().collect();
    if books.is_empty() {
        println!("The catalog is empty.");
    } else {
        print_table(&books);
    }
    pause(input, "")
}

fn show_issued(catalog: &Catalog, input: &mut impl BufRead) -> Result<Flow> {
    clear_screen();
    println!("====== Issued books ======");
    let issued = catalog.issued();
    if issued.is_empty() {
        println!("No books are currently issued.");
    } else {
        print_table(&issued);
    }
    pause(input, "")
}

fn show_available(catalog: &Catalog, input: &mut impl BufRead) -> Result<Flow> {
    clear_screen();
    println!("====== Available books ======");
    let available = catalog.available();
    if available.is_empty() {
        println!("No books are currently available.");
    } else {
        print_table(&available);
    }
    pause(input, "")
}

fn show_statistics(catalog: &Catalog, input: &mut impl BufRead) -> Result<Flow> {
    clear_screen();
    let summary = catalog.summary();
    println!("====== Library statistics ======");
    println!("Total books:     {}", summary.total);
    println!("Issued books:    {}", summary.issued);
    println!("Available books: {}", summary.available);

    println!();
    println!("--- Books by author ---");
    for (author, count) in catalog.stats_by_author() {
        println!("{author:>22} : {count}");
    }

    println!();
    println!("--- Books by title ---");
    for (title, count) in catalog.stats_by_title() {
        println!("{title:>22} : {count}");
    }
    pause(input, "")
}

fn print_table(books: &[&Book]) {
    println!(
        "{:<6} {:<25} {:<20} {}",
        "ID", "Title", "Author", "Status"
    );
    println!("{}", "-".repeat(62));
    for book in books {
        println!(
            "{:<6} {:<25} {:<20} {}",
            book.id,
            book.title,
            book.author,
            book.status_label()
        );
    }
}

fn clear_screen() {
    // ANSI clear + cursor home; works on the terminals the menu targets.
    print!("\x1b[2J\x1b[H");
    let _ = io::stdout().flush();
}

fn prompt_line(input: &mut impl BufRead, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn prompt_nonempty(input: &mut impl BufRead, prompt: &str) -> Result<Option<String>> {
    loop {
        let Some(line) = prompt_line(input, prompt)? else {
            return Ok(None);
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            println!("Input cannot be empty. Please try again.");
            continue;
        }
        return Ok(Some(trimmed.to_string()));
    }
}

fn prompt_u32(input: &mut impl BufRead, prompt: &str) -> Result<Option<u32>> {
    loop {
        let Some(line) = prompt_line(input, prompt)? else {
            return Ok(None);
        };
        match line.trim().parse::<u32>() {
            Ok(value) if value > 0 => return Ok(Some(value)),
            _ => println!("Enter a positive whole number."),
        }
    }
}

fn pause(input: &mut impl BufRead, message: &str) -> Result<Flow> {
    if !message.is_empty() {
        println!("{message}");
    }
    print!("\nPress Enter to continue...");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Flow::Quit);
    }
    Ok(Flow::Continue)
}
