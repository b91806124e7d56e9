use std::{
    env,
    fs::File,
    io::{self, BufRead, BufReader, Write},
};

use anyhow::Context;
use itertools::Itertools;
use log::{debug, warn};
use string_queue::{sort, Queue};

const PROMPT: &str = "queue> ";
const REMOVE_BUFFER_SIZE: usize = 256;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut session = Session::new();

    match env::args().nth(1) {
        Some(path) => {
            let file =
                File::open(&path).with_context(|| format!("could not open script {path}"))?;
            for line in BufReader::new(file).lines() {
                let line = line?;
                println!("{PROMPT}{line}");
                if session.execute(&line) == Outcome::Quit {
                    break;
                }
            }
        }
        None => {
            let stdin = io::stdin();
            let mut stdin = stdin.lock();
            let stdout = io::stdout();
            let mut stdout = stdout.lock();
            loop {
                stdout.write_all(PROMPT.as_bytes())?;
                stdout.flush()?;
                let mut buffer = String::new();
                if stdin.read_line(&mut buffer)? == 0 {
                    break;
                }
                if session.execute(&buffer) == Outcome::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Continue,
    Quit,
}

/// One interpreter session over an optional queue. Commands issued while the
/// queue is absent are warned and tolerated, never fatal.
struct Session {
    queue: Option<Queue>,
}

impl Session {
    fn new() -> Self {
        Session { queue: None }
    }

    fn execute(&mut self, line: &str) -> Outcome {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Outcome::Continue;
        };
        let arguments = parts.collect_vec();

        match command {
            "new" => {
                if self.queue.is_some() {
                    debug!("replacing the existing queue");
                }
                self.queue = Some(Queue::new());
            }
            "free" => {
                if self.queue.take().is_none() {
                    warn!("free called with no queue");
                }
            }
            "ih" | "it" => self.insert(command, &arguments),
            "rh" => self.remove_head(arguments.first().copied()),
            "size" => match &self.queue {
                Some(queue) => println!("{}", queue.len()),
                None => {
                    warn!("size called with no queue");
                    println!("0");
                }
            },
            "reverse" => match self.queue.as_mut() {
                Some(queue) => queue.reverse(),
                None => warn!("reverse called with no queue"),
            },
            "sort" => match self.queue.as_mut() {
                Some(queue) => sort::sort(queue, arguments.first().copied().unwrap_or("")),
                None => warn!("sort called with no queue"),
            },
            "show" => match &self.queue {
                Some(queue) => println!("q = [{}]", queue.iter().join(" ")),
                None => println!("q = NULL"),
            },
            "help" => print_help(),
            "quit" | "exit" => return Outcome::Quit,
            unknown => eprintln!("unknown command {unknown}, try help"),
        }

        Outcome::Continue
    }

    fn insert(&mut self, end: &str, arguments: &[&str]) {
        let Some(queue) = self.queue.as_mut() else {
            warn!("{end} called with no queue");
            return;
        };
        let Some(value) = arguments.first() else {
            eprintln!("usage: {end} <string> [n]");
            return;
        };
        let count = arguments
            .get(1)
            .and_then(|raw| raw.parse::<usize>().ok())
            .unwrap_or(1);
        for _ in 0..count {
            if end == "ih" {
                queue.push_front(value);
            } else {
                queue.push_back(value);
            }
        }
    }

    fn remove_head(&mut self, expected: Option<&str>) {
        let Some(queue) = self.queue.as_mut() else {
            warn!("rh called with no queue");
            return;
        };
        let mut buffer = [0u8; REMOVE_BUFFER_SIZE];
        if !queue.pop_front_into(&mut buffer) {
            println!("queue is empty");
            return;
        }
        let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
        let removed = String::from_utf8_lossy(&buffer[..end]);
        println!("removed {removed}");
        if let Some(expected) = expected {
            if removed != expected {
                eprintln!("expected {expected} but removed {removed}");
            }
        }
    }
}

fn print_help() {
    println!("new              create a fresh empty queue");
    println!("free             drop the queue");
    println!("ih <str> [n]     insert at the head, n times");
    println!("it <str> [n]     insert at the tail, n times");
    println!("rh [expected]    remove the head and print it");
    println!("size             print the element count");
    println!("reverse          reverse the queue in place");
    println!("sort [engine]    sort the queue (recursive | bottomup)");
    println!("show             print the queue front to back");
    println!("quit             leave the shell");
}
