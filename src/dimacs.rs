use std::fs;

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, space0, space1};
use nom::combinator::{map_res, opt};
use nom::sequence::{preceded, separated_pair, terminated, tuple};

use crate::error::{CliqueError, Result};


/** reads an instance from file, returns (n,m,adj_list) (see [`read_from_str`]) */
pub fn read_from_file(filename:&str) -> Result<(usize, usize, Vec<Vec<usize>>)> {
    let content = fs::read_to_string(filename)
        .map_err(|source| CliqueError::Io { path: filename.to_string(), source })?;
    read_from_str(content.as_str())
}

/** parses DIMACS content, returns (n,m,adj_list) with 0-based vertex indices.
 - `c` lines are comments, lines that are neither `p` nor `e` are ignored
 - `p edge n m` (or `p col n m`) declares the number of vertices. Without it, n is the largest id
 - `e u v` declares an edge (WARNING: indices start at 1 in the DIMACS format)
m is the number of edge lines read.
*/
pub fn read_from_str(content:&str) -> Result<(usize, usize, Vec<Vec<usize>>)> {
    let mut declared_n:Option<usize> = None;
    let mut edges:Vec<(usize,usize,usize)> = Vec::new(); // (a, b, line)
    for (i,raw_line) in content.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r').trim_start();
        let line_nb = i+1;
        if line.starts_with('p') {
            let (_,(n,_)) = read_header(line).map_err(|_| CliqueError::Parse {
                line: line_nb, msg: format!("malformed header '{}'", line)
            })?;
            declared_n = Some(n);
        } else if line.starts_with('e') {
            let (_,(a,b)) = read_edge(line).map_err(|_| CliqueError::Parse {
                line: line_nb, msg: format!("malformed edge '{}'", line)
            })?;
            if a == 0 || b == 0 {
                return Err(CliqueError::Parse { line: line_nb, msg: "vertex ids start at 1".to_string() });
            }
            if let Some(n) = declared_n {
                if a > n || b > n {
                    return Err(CliqueError::Parse {
                        line: line_nb, msg: format!("edge ({},{}) exceeds the {} declared vertices", a, b, n)
                    });
                }
            }
            if a == b {
                return Err(CliqueError::InvalidGraph(format!("self-loop on vertex {} (line {})", a, line_nb)));
            }
            edges.push((a,b,line_nb));
        }
    }
    let max_id = edges.iter().map(|(a,b,_)| *a.max(b)).max().unwrap_or(0);
    let n = declared_n.unwrap_or(max_id);
    // edges read before the header (or before a smaller one) are checked here
    if let Some((a,b,line_nb)) = edges.iter().find(|(a,b,_)| *a > n || *b > n) {
        return Err(CliqueError::Parse {
            line: *line_nb, msg: format!("edge ({},{}) exceeds the {} declared vertices", a, b, n)
        });
    }
    let mut adj_list = vec![Vec::new() ; n];
    for (a,b,_) in edges.iter() {
        adj_list[a-1].push(b-1);
        adj_list[b-1].push(a-1);
    }
    Ok((n, edges.len(), adj_list))
}

/// reads a non-negative integer
fn read_integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two numbers separated by spaces (trailing spaces allowed)
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    terminated(separated_pair(read_integer, space1, read_integer), space0)(s)
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(
        tuple((tag("p"), space1, alt((tag("edge"), tag("col"))), space1)),
        read_two_integers
    )(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(
        tuple((tag("e"), opt(space1))),
        read_two_integers
    )(s)
}
