//! The option table shown for `--help` and after argument errors.

use super::params::RunConfig;

/// Render the usage table for `prog`, interpolating `defaults`.
///
/// Returned as a string rather than printed: the front end owns the
/// decision of where it goes (stderr) and what exit code follows.
pub fn usage(prog: &str, defaults: &RunConfig) -> String {
    format!(
        "\
usage: {prog} [options]

options:
  -h, --help            show this help message and exit
  -v, --verbose         print plenty of helpful information, e.g. prompt
  -i, --interactive     run in interactive mode
  --interactive-first   run in interactive mode and wait for input right away
  -ins, --instruct      run in instruction mode
  -r PROMPT, --reverse-prompt PROMPT
                        run in interactive mode and poll user input upon seeing PROMPT (can be
                        specified more than once for multiple prompts).
  --color               colorise output to distinguish prompt and user input from generations
  -s SEED, --seed SEED  RNG seed (default: {seed}, use random seed for <= 0)
  -t N, --threads N     number of threads to use during computation (default: {n_threads})
  -p PROMPT, --prompt PROMPT
                        prompt to start generation with (default: companion persona)
  --random-prompt       start with a randomized prompt.
  --in-prefix STRING    string to prefix user inputs with (default: empty)
  -f FNAME, --file FNAME
                        prompt file to start generation with (default: companion persona)
  -C FNAME, --prompt_cache FNAME
                        path of cache for fast prompt reload (default: none)
  -n N, --n_predict N   number of tokens to predict (default: {n_predict}, -1 = infinity)
  --top_k N             top-k sampling (default: {top_k})
  --top_p N             top-p sampling (default: {top_p:.1})
  --repeat_last_n N     last n tokens to consider for penalize (default: {repeat_last_n})
  --repeat_penalty N    penalize repeat sequence of tokens (default: {repeat_penalty:.1})
  -c N, --ctx_size N    size of the prompt context (default: {n_ctx})
  --ignore-eos          ignore end of stream token and continue generating
  --memory_f32          use f32 instead of f16 for memory key+value
  --temp N              temperature (default: {temp:.1})
  --n_parts N           number of model parts (default: {n_parts}, -1 = determine from dimensions)
  -b N, --batch_size N  batch size for prompt processing (default: {n_batch})
  --perplexity          compute perplexity over the prompt
  --keep NUM|STR        number of tokens to keep from the initial prompt, or substring
                        to search for within the prompt that divides it from
                        its initial example text (default: {keep}, -1 = all)
  --mlock               force system to keep model in RAM rather than swapping or compressing
  --no-mmap             do not memory-map model (slower load but may reduce pageouts if not using mlock)
  --mtest               compute maximum memory usage
  --embedding           produce embeddings instead of generating text
  --verbose-prompt      print prompt before generation
  --lora FNAME          apply LoRA adapter (implies --no-mmap)
  --lora-base FNAME     optional model to use as a base for the layers modified by the LoRA adapter
  -m FNAME, --model FNAME
                        model path (default: {model})

",
        prog = prog,
        seed = defaults.seed,
        n_threads = defaults.n_threads,
        n_predict = defaults.n_predict,
        top_k = defaults.top_k,
        top_p = defaults.top_p,
        repeat_last_n = defaults.repeat_last_n,
        repeat_penalty = defaults.repeat_penalty,
        n_ctx = defaults.n_ctx,
        temp = defaults.temp,
        n_parts = defaults.n_parts,
        n_batch = defaults.n_batch,
        keep = defaults.keep.count(),
        model = defaults.model.display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every flag spelling the resolver accepts, as it appears in the
    /// table. Paired short/long spellings share a line.
    const FLAG_LINES: [&str; 35] = [
        "-h, --help",
        "-v, --verbose",
        "-i, --interactive",
        "--interactive-first",
        "-ins, --instruct",
        "-r PROMPT, --reverse-prompt PROMPT",
        "--color",
        "-s SEED, --seed SEED",
        "-t N, --threads N",
        "-p PROMPT, --prompt PROMPT",
        "--random-prompt",
        "--in-prefix STRING",
        "-f FNAME, --file FNAME",
        "-C FNAME, --prompt_cache FNAME",
        "-n N, --n_predict N",
        "--top_k N",
        "--top_p N",
        "--repeat_last_n N",
        "--repeat_penalty N",
        "-c N, --ctx_size N",
        "--ignore-eos",
        "--memory_f32",
        "--temp N",
        "--n_parts N",
        "-b N, --batch_size N",
        "--perplexity",
        "--keep NUM|STR",
        "--mlock",
        "--no-mmap",
        "--mtest",
        "--embedding",
        "--verbose-prompt",
        "--lora FNAME",
        "--lora-base FNAME",
        "-m FNAME, --model FNAME",
    ];

    #[test]
    fn every_flag_appears_in_the_table() {
        let text = usage("confab", &RunConfig::default());
        for line in FLAG_LINES {
            assert!(text.contains(line), "usage table is missing '{line}'");
        }
    }

    #[test]
    fn program_name_and_defaults_are_interpolated() {
        let defaults = RunConfig {
            n_threads: 6,
            ..RunConfig::default()
        };

        let text = usage("confab", &defaults);
        assert!(text.starts_with("usage: confab [options]"));
        assert!(text.contains("computation (default: 6)"));
        assert!(text.contains("temperature (default: 0.8)"));
        assert!(text.contains("model path (default: models/7B/ggml-model.bin)"));
    }
}
